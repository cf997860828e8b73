use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Method;
use serde_json::Value;

use super::transport::{HttpTransport, RequestOptions};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Default [`HttpTransport`] backed by a pooled `reqwest::Client`.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from [`ClientConfig`]
/// - **Connection pooling**: up to 10 idle connections per host, dropped after 90s
/// - **Compression**: gzip, deflate, brotli and zstd
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use std::sync::Arc;
/// use users_api_client::{ClientConfig, ReqwestTransport, UserService};
///
/// let transport = ReqwestTransport::from_config(&ClientConfig::default())?;
/// let service = UserService::new(Arc::new(transport));
/// let user = service.get_user_by_id(2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Builds a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            // Timeouts
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            // Connection pooling
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            // Enable compression (gzip, deflate, brotli, zstd)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .zstd(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_client(client, config.base_url.as_str()))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.client.request(method.clone(), &url);
        if !options.query.is_empty() {
            request = request.query(&options.query_pairs());
        }
        if let Some(body) = &options.json {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            tracing::warn!(%method, %url, error = %source, "request failed");
            TransportError::request(path, source)
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%method, %url, status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| TransportError::request(path, source))?;

        parse_body(path, &text)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError> {
        self.send(Method::GET, path, options).await
    }

    async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, TransportError> {
        self.send(Method::POST, path, options).await
    }
}

/// Reads an integer `Retry-After` value. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Parses a success body; an empty body is `null`.
fn parse_body(path: &str, text: &str) -> Result<Value, TransportError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(text).map_err(|e| {
        tracing::warn!(path, error = %e, "response body is not JSON");
        TransportError::InvalidJson {
            path: path.to_string(),
            detail: e.to_string(),
        }
    })
}
