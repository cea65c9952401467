// src/models/mod.rs

//! Domain models for the notifier.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod history;
mod homework;
mod verdict;

// Re-export all public types
pub use config::{ApiConfig, Config, CursorPolicy, LoggingConfig, Messages, PollingConfig};
pub use history::StatusHistory;
pub use homework::{HomeworkBatch, HomeworkRecord};
pub use verdict::{Verdict, VerdictTable};
