//! Status diff between a fetched batch and the notification history.
//!
//! The diff only reads [`StatusHistory`]; the poller records a change after
//! it has attempted delivery.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{HomeworkRecord, Messages, StatusHistory, Verdict, VerdictTable};

/// A homework whose verdict differs from what was last sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub homework_name: String,
    pub verdict: Verdict,
    /// Verdict text as stored in the history
    pub verdict_text: String,
    /// Rendered chat message
    pub message: String,
}

/// Outcome of diffing one batch.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Changes in API order
    pub changes: Vec<StatusChange>,
    /// Names whose verdict matched the history
    pub unchanged: Vec<String>,
}

impl DiffResult {
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}

/// Calculator for status changes.
#[derive(Debug, Clone, Copy)]
pub struct StatusDiff<'a> {
    verdicts: &'a VerdictTable,
    messages: &'a Messages,
}

impl<'a> StatusDiff<'a> {
    pub fn new(verdicts: &'a VerdictTable, messages: &'a Messages) -> Self {
        Self { verdicts, messages }
    }

    /// Parse a record and render its verdict text.
    pub fn parse_status(&self, record: &HomeworkRecord) -> Result<(Verdict, String)> {
        if record.name.trim().is_empty() {
            log::error!("Homework entry without a name (status '{}')", record.status);
            return Err(AppError::parse_status("homework has no name"));
        }
        let verdict = record.status.parse::<Verdict>().map_err(|e| {
            log::error!(
                "Homework '{}' has unrecognized status '{}'",
                record.name,
                record.status
            );
            e
        })?;
        Ok((verdict, self.verdicts.message(verdict).to_string()))
    }

    /// Compare every entry of `homeworks` against `history`.
    ///
    /// Fails on the first entry that cannot be parsed; in that case no change
    /// from the batch is reported.
    pub fn calculate(&self, history: &StatusHistory, homeworks: &[Value]) -> Result<DiffResult> {
        let mut result = DiffResult::default();
        // Entries seen earlier in this batch shadow the history.
        let mut pending: HashMap<String, String> = HashMap::new();

        for entry in homeworks {
            let record = HomeworkRecord::from_value(entry)?;
            let (verdict, verdict_text) = self.parse_status(&record)?;

            let previous = pending
                .get(&record.name)
                .map(String::as_str)
                .or_else(|| history.get(&record.name));

            if previous == Some(verdict_text.as_str()) {
                log::debug!("No updates for '{}'", record.name);
                result.unchanged.push(record.name);
                continue;
            }

            pending.insert(record.name.clone(), verdict_text.clone());
            result.changes.push(StatusChange {
                message: self.messages.format_status(&record.name, &verdict_text),
                homework_name: record.name,
                verdict,
                verdict_text,
            });
        }

        Ok(result)
    }
}
