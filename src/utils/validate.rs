//! Input and response-shape checks shared by the service operations.

use crate::error::{ApiError, ClientError, ClientResult};
use serde_json::Value;

/// Rejects values below 1.
pub fn validate_positive_integer(value: i64, field_name: &str) -> ClientResult<()> {
    if value < 1 {
        return Err(ClientError::invalid_argument(
            field_name,
            format!("{} must be greater than 0.", field_name),
        ));
    }
    Ok(())
}

/// Rejects strings that are empty once surrounding whitespace is trimmed.
pub fn validate_non_empty_string(value: &str, field_name: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::invalid_argument(
            field_name,
            format!("{} must not be empty.", field_name),
        ));
    }
    Ok(())
}

/// Checks that every key in `required_keys` is present in `response`.
///
/// Missing keys are reported in the order they were requested. Anything other
/// than a JSON object is treated as having no keys.
pub fn validate_response_keys(response: &Value, required_keys: &[&str]) -> Result<(), ApiError> {
    let missing: Vec<&str> = match response.as_object() {
        Some(object) => required_keys
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect(),
        None => required_keys.to_vec(),
    };

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::for_invalid_response(format!(
            "Missing keys: {}",
            missing.join(", ")
        )))
    }
}
