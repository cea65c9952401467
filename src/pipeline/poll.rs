// src/pipeline/poll.rs

//! Polling loop: fetch, validate, diff, notify, sleep.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::{FailureKind, Result};
use crate::models::{Config, StatusHistory};
use crate::services::{DeliveryOutcome, HomeworkClient, Notifier, deliver};

use super::cursor::Cursor;
use super::diff::{DiffResult, StatusDiff};
use super::validate::validate_response;

/// How a single iteration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The batch was processed.
    Checked { changed: usize, unchanged: usize },
    /// A stage failed; one failure message was sent.
    Failed(FailureKind),
}

/// Summary of one iteration.
#[derive(Debug, Clone)]
pub struct IterationReport {
    /// Cursor sent to the API
    pub from_date: i64,
    pub outcome: IterationOutcome,
    /// One entry per attempted notification, in send order
    pub deliveries: Vec<DeliveryOutcome>,
}

impl IterationReport {
    pub fn dropped_count(&self) -> usize {
        self.deliveries.iter().filter(|d| !d.is_delivered()).count()
    }
}

/// Owns the loop state: status history and cursor.
pub struct Poller {
    config: Arc<Config>,
    client: HomeworkClient,
    notifier: Arc<dyn Notifier>,
    history: StatusHistory,
    cursor: Cursor,
}

impl Poller {
    /// Create a poller whose cursor is anchored at the current time.
    pub fn new(config: Arc<Config>, client: HomeworkClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::starting_at(config, client, notifier, Utc::now().timestamp())
    }

    /// Create a poller whose cursor is anchored at `start` (Unix seconds).
    pub fn starting_at(
        config: Arc<Config>,
        client: HomeworkClient,
        notifier: Arc<dyn Notifier>,
        start: i64,
    ) -> Self {
        let cursor = Cursor::new(&config.polling, start);
        Self {
            config,
            client,
            notifier,
            history: StatusHistory::new(),
            cursor,
        }
    }

    pub fn history(&self) -> &StatusHistory {
        &self.history
    }

    /// Poll forever, sleeping `retry_period_secs` after every iteration.
    pub async fn run(mut self) {
        let period = Duration::from_secs(self.config.polling.retry_period_secs);
        log::info!(
            "Polling {} every {}s (cursor: {:?})",
            self.client.endpoint(),
            period.as_secs(),
            self.cursor.policy()
        );

        loop {
            let report = self.run_once().await;
            match &report.outcome {
                IterationOutcome::Checked { changed, unchanged } => log::info!(
                    "Poll from_date={}: {} changed, {} unchanged, {} dropped",
                    report.from_date,
                    changed,
                    unchanged,
                    report.dropped_count()
                ),
                IterationOutcome::Failed(kind) => {
                    log::warn!("Poll from_date={} failed: {}", report.from_date, kind)
                }
            }
            tokio::time::sleep(period).await;
        }
    }

    /// Run one iteration at the current time.
    pub async fn run_once(&mut self) -> IterationReport {
        self.run_once_at(Utc::now().timestamp()).await
    }

    /// Run one iteration as if the clock read `now`.
    ///
    /// Never fails: stage errors become a single failure notification.
    pub async fn run_once_at(&mut self, now: i64) -> IterationReport {
        let from_date = self.cursor.from_date(now);
        let mut deliveries = Vec::new();

        let checked = self.check(from_date).await;
        let outcome = match checked {
            Ok((diff, current_date)) => {
                self.cursor.observe(current_date);
                let changed = diff.change_count();
                let unchanged = diff.unchanged.len();

                for change in diff.changes {
                    log::info!(
                        "Status of '{}' is now {}",
                        change.homework_name,
                        change.verdict
                    );
                    deliveries.push(deliver(self.notifier.as_ref(), &change.message).await);
                    self.history.record(change.homework_name, change.verdict_text);
                }
                IterationOutcome::Checked { changed, unchanged }
            }
            Err(e) => {
                let kind = FailureKind::from(&e);
                log::error!("Polling iteration failed: {}", e);
                let text = self.config.messages.for_failure(kind);
                deliveries.push(deliver(self.notifier.as_ref(), text).await);
                IterationOutcome::Failed(kind)
            }
        };

        IterationReport {
            from_date,
            outcome,
            deliveries,
        }
    }

    /// Fetch, validate and diff without touching the history.
    async fn check(&self, from_date: i64) -> Result<(DiffResult, Option<i64>)> {
        let response = self.client.fetch(from_date).await?;
        let batch = validate_response(response)?;
        let diff = StatusDiff::new(&self.config.verdicts, &self.config.messages)
            .calculate(&self.history, &batch.homeworks)?;
        Ok((diff, batch.current_date_secs()))
    }
}
