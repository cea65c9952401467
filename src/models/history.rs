//! Last-notified status per homework.

use std::collections::HashMap;

/// In-memory record of the verdict text last sent for each homework.
///
/// Lives as long as the poller that owns it; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct StatusHistory {
    entries: HashMap<String, String>,
}

impl StatusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last verdict text recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Record a verdict text, returning the previous one.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        verdict_text: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(name.into(), verdict_text.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
