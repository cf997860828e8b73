//! CLI argument validation functions
//!
//! Value parsers for arguments that need more than a type conversion.

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate that a base URL is an absolute http(s) URL with a host
pub fn validate_base_url(url_str: &str) -> Result<String, String> {
    let url = url_str.trim();

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| format!("Base URL must start with http:// or https://, got: '{}'", url_str))?;

    if rest.is_empty() || rest.starts_with('/') {
        return Err(format!("Base URL must include a host, got: '{}'", url_str));
    }

    if url.contains(char::is_whitespace) {
        return Err(format!("Base URL cannot contain whitespace, got: '{}'", url_str));
    }

    Ok(url.to_string())
}
