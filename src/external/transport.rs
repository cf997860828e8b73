//! Transport abstraction consumed by the service layer.
//!
//! The service never talks to the network directly; it goes through an
//! [`HttpTransport`] handed to it at construction time. [`ReqwestTransport`]
//! is the default implementation, tests use in-memory fakes.
//!
//! [`ReqwestTransport`]: super::ReqwestTransport

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Per-request options understood by every transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Query parameters, appended in insertion order
    pub query: Map<String, Value>,
    /// JSON request body
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter. Values should be scalars.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets the JSON request body.
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.json = Some(body.into());
        self
    }

    /// Query parameters rendered as string pairs.
    ///
    /// Strings are passed through verbatim, other scalars use their JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect()
    }
}

/// Capability to perform HTTP calls against the users API and return the
/// parsed JSON body.
///
/// Implementations must fail with [`TransportError`] when the call cannot be
/// made, the remote answers with a non-success status, or the body is not JSON.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs a GET on `path`, relative to the transport's base URL.
    async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError>;

    /// Performs a POST on `path`, relative to the transport's base URL.
    async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError>;
}
