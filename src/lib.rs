//! Users API Client Library
//!
//! Typed async client for a paginated users REST API: input validation,
//! response shape checks and structured errors on top of a pluggable
//! HTTP transport.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, Settings};
pub use error::{ApiError, ClientError, ClientResult, TransportError};
pub use external::{HttpTransport, RequestOptions, ReqwestTransport};
pub use models::{User, UserPage};
pub use services::UserService;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
