use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use std::fmt;

/// Diagnostic key/value bag attached to an [`ApiError`].
///
/// Backed by `serde_json::Map` with the `preserve_order` feature, so keys
/// keep the order in which they were inserted.
pub type ErrorContext = Map<String, Value>;

/// Boxed cause stored inside an [`ApiError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structured failure returned whenever a remote call, or the interpretation
/// of its response, goes wrong.
///
/// `code` follows HTTP status semantics: `400..=499` is a client error,
/// `>= 500` a server error and anything else (usually `0`) is unclassified.
#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: u16,
    context: ErrorContext,
    source: Option<BoxError>,
}

impl ApiError {
    /// Creates an error with an empty context and no cause.
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
            context: ErrorContext::new(),
            source: None,
        }
    }

    /// The remote answered, but not with the shape we expected.
    pub fn for_invalid_response(detail: impl fmt::Display) -> Self {
        Self::new(format!("Invalid response received: {}", detail), 400)
    }

    /// The remote answered with a body that is not JSON.
    pub fn for_invalid_json(detail: impl fmt::Display) -> Self {
        Self::new(format!("Invalid JSON received: {}", detail), 400)
    }

    /// The remote refused the call because of rate limiting.
    pub fn for_rate_limit_exceeded(retry_after_seconds: u64) -> Self {
        Self::new(
            format!(
                "Rate limit exceeded. Try again in {} seconds.",
                retry_after_seconds
            ),
            429,
        )
    }

    /// Adds a context entry. Re-using a key replaces its value in place.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches the underlying cause. Message and code are left untouched.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code)
    }

    pub fn is_server_error(&self) -> bool {
        self.code >= 500
    }

    /// Walks the cause chain and returns the first cause of type `E`.
    ///
    /// ```ignore
    /// if let Some(transport) = err.find_cause::<TransportError>() {
    ///     let classified = transport.classify();
    /// }
    /// ```
    pub fn find_cause<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        let mut current = self.source();
        while let Some(cause) = current {
            if let Some(found) = cause.downcast_ref::<E>() {
                return Some(found);
            }
            current = cause.source();
        }
        None
    }

    /// JSON form with exactly `message`, `code` and `context`.
    pub fn to_value(&self) -> Value {
        json!({
            "message": self.message,
            "code": self.code,
            "context": self.context,
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiError", 3)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("context", &self.context)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct ResetError;

    #[test]
    fn test_named_constructors() {
        let err = ApiError::for_invalid_response("Missing keys: data");
        assert_eq!(err.message(), "Invalid response received: Missing keys: data");
        assert_eq!(err.code(), 400);

        let err = ApiError::for_invalid_json("expected value at line 1");
        assert_eq!(err.message(), "Invalid JSON received: expected value at line 1");
        assert_eq!(err.code(), 400);

        let err = ApiError::for_rate_limit_exceeded(30);
        assert_eq!(err.message(), "Rate limit exceeded. Try again in 30 seconds.");
        assert_eq!(err.code(), 429);
        assert!(err.context().is_empty());
    }

    #[test]
    fn test_classification_boundaries() {
        let cases = [
            (0, false, false),
            (399, false, false),
            (400, true, false),
            (429, true, false),
            (499, true, false),
            (500, false, true),
            (503, false, true),
        ];

        for (code, client, server) in cases {
            let err = ApiError::new("boom", code);
            assert_eq!(err.is_client_error(), client, "code {}", code);
            assert_eq!(err.is_server_error(), server, "code {}", code);
        }
    }

    #[test]
    fn test_to_value_has_exactly_three_fields() {
        let err = ApiError::new("Failed to fetch user", 0)
            .with_context("id", 7)
            .with_source(ResetError);

        let value = err.to_value();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["message"], "Failed to fetch user");
        assert_eq!(value["code"], 0);
        assert_eq!(value["context"], json!({"id": 7}));

        assert_eq!(serde_json::to_value(&err).unwrap(), value);
    }

    #[test]
    fn test_context_keeps_insertion_order() {
        let err = ApiError::new("Failed to create user", 0)
            .with_context("name", "John")
            .with_context("job", "Developer");

        let keys: Vec<&str> = err.context().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "job"]);
    }

    #[test]
    fn test_source_does_not_change_message_or_code() {
        let err = ApiError::for_invalid_json("eof").with_source(ResetError);

        assert_eq!(err.message(), "Invalid JSON received: eof");
        assert_eq!(err.code(), 400);
        assert_eq!(err.to_string(), "Invalid JSON received: eof");
        assert_eq!(err.source().unwrap().to_string(), "connection reset");
    }

    #[test]
    fn test_find_cause_walks_nested_chain() {
        let inner = ApiError::for_invalid_response("bad").with_source(ResetError);
        let outer = ApiError::new("Failed to fetch user", 0).with_source(inner);

        assert!(outer.find_cause::<ResetError>().is_some());
        let nested = outer.find_cause::<ApiError>().unwrap();
        assert_eq!(nested.code(), 400);
        assert!(ApiError::new("alone", 0).find_cause::<ResetError>().is_none());
    }
}
