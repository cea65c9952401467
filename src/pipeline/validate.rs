// src/pipeline/validate.rs

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::HomeworkBatch;

/// Check the response shape and split it into a [`HomeworkBatch`].
///
/// Checks run in order and stop at the first failure: the body is an object,
/// `homeworks` is an array, `current_date` is present.
pub fn validate_response(response: Value) -> Result<HomeworkBatch> {
    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(AppError::malformed(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )));
        }
    };

    let homeworks = match body.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AppError::malformed(format!(
                "'homeworks' must be an array, got {}",
                kind_of(&other)
            )));
        }
        None => return Err(AppError::malformed("'homeworks' is missing")),
    };

    let current_date = body
        .remove("current_date")
        .ok_or_else(|| AppError::malformed("'current_date' is missing"))?;

    Ok(HomeworkBatch {
        homeworks,
        current_date,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message_of(err: AppError) -> String {
        match err {
            AppError::MalformedResponse(message) => message,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_well_formed_response() {
        let batch = validate_response(json!({
            "homeworks": [{ "homework_name": "hw1", "status": "approved" }],
            "current_date": 1000,
        }))
        .unwrap();

        assert_eq!(batch.homeworks.len(), 1);
        assert_eq!(batch.current_date_secs(), Some(1000));
    }

    #[test]
    fn accepts_empty_homework_list() {
        let batch = validate_response(json!({ "homeworks": [], "current_date": 5 })).unwrap();
        assert!(batch.homeworks.is_empty());
    }

    #[test]
    fn rejects_non_object() {
        let message = message_of(validate_response(json!([1, 2, 3])).unwrap_err());
        assert!(message.contains("object"), "{message}");
    }

    #[test]
    fn rejects_non_array_homeworks() {
        let message = message_of(
            validate_response(json!({ "homeworks": { "hw1": "approved" }, "current_date": 1 }))
                .unwrap_err(),
        );
        assert!(message.contains("'homeworks' must be an array"), "{message}");
    }

    #[test]
    fn rejects_missing_homeworks() {
        let message = message_of(validate_response(json!({ "current_date": 1 })).unwrap_err());
        assert!(message.contains("'homeworks' is missing"), "{message}");
    }

    #[test]
    fn rejects_missing_current_date() {
        let message = message_of(validate_response(json!({ "homeworks": [] })).unwrap_err());
        assert!(message.contains("current_date"), "{message}");
    }

    #[test]
    fn stops_at_first_violation() {
        // Both homeworks and current_date are wrong; only the first is reported.
        let message = message_of(validate_response(json!({ "homeworks": "nope" })).unwrap_err());
        assert!(message.contains("homeworks"), "{message}");
        assert!(!message.contains("current_date"), "{message}");
    }
}
