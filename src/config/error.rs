//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or validating client settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Sources were read but do not deserialize into `Settings`
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(#[source] config::ConfigError),

    /// A setting holds a value outside its accepted range or format
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending setting, e.g. `client.base_url`
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// The environment name is not one we know
    #[error("Invalid environment '{0}'. Valid values are: development, test, staging, production")]
    UnknownEnvironment(String),

    /// Both the directory and the single-file source were requested
    #[error("{dir_var} and {file_var} cannot both be set")]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    /// Any other failure reported by the config crate while building sources
    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
