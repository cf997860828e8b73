use super::ApiError;
use thiserror::Error;

/// Top-level error returned by every public client operation.
///
/// The two variants map onto the two ways a call can go wrong: the caller
/// passed something we refuse to send (`InvalidArgument`), or the remote
/// side of the call failed (`Api`).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local validation rejected a caller-supplied value. Raised before any
    /// transport interaction and never wrapped.
    #[error("{message}")]
    InvalidArgument { field: String, message: String },

    /// The transport or the response failed; always carries context.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ClientError::InvalidArgument { .. })
    }

    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            ClientError::InvalidArgument { .. } => None,
        }
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display_is_message() {
        let err = ClientError::invalid_argument("id", "id must be greater than 0.");
        assert_eq!(err.to_string(), "id must be greater than 0.");
        assert!(err.is_invalid_argument());
        assert!(err.as_api_error().is_none());
    }

    #[test]
    fn test_api_variant_is_transparent() {
        let err: ClientError = ApiError::for_rate_limit_exceeded(5).into();
        assert_eq!(err.to_string(), "Rate limit exceeded. Try again in 5 seconds.");
        assert!(!err.is_invalid_argument());
        assert_eq!(err.as_api_error().map(ApiError::code), Some(429));
    }
}
