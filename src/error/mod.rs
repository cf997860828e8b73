mod api_error;
mod client_error;
mod transport_error;

pub use api_error::{ApiError, BoxError, ErrorContext};
pub use client_error::{ClientError, ClientResult};
pub use transport_error::TransportError;
