//! In-memory transport used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::external::{HttpTransport, RequestOptions};

/// A call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub options: RequestOptions,
}

/// Transport that replays scripted outcomes and records every call.
///
/// Outcomes are consumed in order regardless of method or path. A call with
/// nothing left to replay panics, which doubles as an assertion that the
/// code under test never reached the transport.
#[derive(Default)]
pub(crate) struct MockTransport {
    outcomes: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, body: Value) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn fail_with(self, error: TransportError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            options,
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {} {}", method, path))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError> {
        self.record("GET", path, options)
    }

    async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError> {
        self.record("POST", path, options)
    }
}
