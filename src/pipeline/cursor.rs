//! `from_date` cursor for the review API.

use crate::models::{CursorPolicy, PollingConfig};

/// Lower time bound for the next poll, in Unix seconds.
#[derive(Debug, Clone)]
pub struct Cursor {
    policy: CursorPolicy,
    lookback_secs: i64,
    anchor: i64,
}

impl Cursor {
    /// Create a cursor anchored at `start - lookback`.
    pub fn new(config: &PollingConfig, start: i64) -> Self {
        Self {
            policy: config.cursor,
            lookback_secs: config.lookback_secs,
            anchor: start.saturating_sub(config.lookback_secs),
        }
    }

    pub fn policy(&self) -> CursorPolicy {
        self.policy
    }

    /// Value to send as `from_date` for a poll made at `now`.
    pub fn from_date(&self, now: i64) -> i64 {
        match self.policy {
            CursorPolicy::Rolling => now.saturating_sub(self.lookback_secs),
            CursorPolicy::Fixed | CursorPolicy::Incremental => self.anchor,
        }
    }

    /// Feed back the `current_date` of a successful poll.
    pub fn observe(&mut self, current_date: Option<i64>) {
        if self.policy != CursorPolicy::Incremental {
            return;
        }
        match current_date {
            Some(date) if date > self.anchor => {
                log::debug!("Cursor advanced {} -> {}", self.anchor, date);
                self.anchor = date;
            }
            Some(_) => {}
            None => log::warn!("current_date is not an integer; cursor not advanced"),
        }
    }
}
