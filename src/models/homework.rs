//! Homework records as returned by the review API.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};

/// One homework entry of the `homeworks` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HomeworkRecord {
    /// Homework identifier shown to the user
    #[serde(rename = "homework_name", default)]
    pub name: String,

    /// Raw verdict code
    #[serde(default)]
    pub status: String,
}

impl HomeworkRecord {
    /// Read a record out of a raw JSON element.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AppError::parse_status(format!(
                "homework entry is not an object: {value}"
            )));
        }
        Self::deserialize(value)
            .map_err(|e| AppError::parse_status(format!("invalid homework entry: {e}")))
    }
}

/// A response that passed shape validation.
#[derive(Debug, Clone)]
pub struct HomeworkBatch {
    /// Raw homework entries in API order
    pub homeworks: Vec<Value>,

    /// Cursor-refresh value reported by the API
    pub current_date: Value,
}

impl HomeworkBatch {
    /// `current_date` as Unix seconds, when it is an integer.
    pub fn current_date_secs(&self) -> Option<i64> {
        self.current_date.as_i64()
    }
}
