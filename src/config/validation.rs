//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use validator::Validate;

use crate::config::error::ConfigError;
use crate::config::settings::{ClientConfig, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ClientConfig {
    /// Validate client configuration
    ///
    /// # Validation Rules
    /// - Base URL must be an absolute `http` or `https` URL
    /// - Timeouts must be within their allowed ranges
    /// - User agent must not be empty
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let mut fields: Vec<_> = field_errors.keys().collect();
            fields.sort();

            if let Some(field) = fields.first() {
                let message = field_errors[*field]
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                return Err(ConfigError::ValidationError {
                    field: format!("client.{}", field),
                    message,
                });
            }
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "client.base_url",
                "Base URL must use the http or https scheme.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.validate_config()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<(), ConfigError>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_client_rejects_relative_base_url() {
        let config = ClientConfig {
            base_url: "reqres.in/api".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(field_of(config.validate_config()), "client.base_url");
    }

    #[test]
    fn test_client_rejects_non_http_scheme() {
        let config = ClientConfig {
            base_url: "ftp://reqres.in/api".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(field_of(config.validate_config()), "client.base_url");
    }

    #[test]
    fn test_client_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        match config.validate_config() {
            Err(ConfigError::ValidationError { field, message }) => {
                assert_eq!(field, "client.timeout_secs");
                assert_eq!(message, "Timeout must be between 1 and 300 seconds");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_client_rejects_empty_user_agent() {
        let config = ClientConfig {
            user_agent: String::new(),
            ..ClientConfig::default()
        };
        assert_eq!(field_of(config.validate_config()), "client.user_agent");
    }

    #[test]
    fn test_logger_rejects_unknown_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..LoggerSettings::default()
        };
        assert_eq!(field_of(settings.validate()), "logger.level");
    }

    #[test]
    fn test_logger_level_is_case_insensitive() {
        let settings = LoggerSettings {
            level: "DEBUG".to_string(),
            format: "Json".to_string(),
            colored: false,
        };
        assert!(settings.validate().is_ok());
    }
}
