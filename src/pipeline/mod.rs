//! Polling pipeline stages.
//!
//! - `validate`: Check the response shape
//! - `diff`: Compare verdicts against the notification history
//! - `cursor`: Choose the `from_date` of each poll
//! - `poll`: Drive fetch → validate → diff → notify → sleep

pub mod cursor;
pub mod diff;
pub mod poll;
pub mod validate;

pub use cursor::Cursor;
pub use diff::{DiffResult, StatusChange, StatusDiff};
pub use poll::{IterationOutcome, IterationReport, Poller};
pub use validate::validate_response;
