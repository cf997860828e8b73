pub mod validate;

pub use validate::{validate_non_empty_string, validate_positive_integer, validate_response_keys};
