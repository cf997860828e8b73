//! Outbound HTTP plumbing.

mod client;
mod transport;

pub use client::ReqwestTransport;
pub use transport::{HttpTransport, RequestOptions};
