//! Configuration loader for users-api-client
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "USERS_API_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "USERS_API_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "USERS_API";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required when the directory was chosen explicitly)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `USERS_API_*` environment variables
///
/// In single-file mode only that file and the environment variables are read.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
    require_default: bool,
}

impl ConfigLoader {
    /// Create a loader from `USERS_API_CONFIG_DIR`, `USERS_API_CONFIG_FILE`
    /// and `USERS_API_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `USERS_API_CONFIG_DIR` and
    /// `USERS_API_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::ConflictingSources {
                dir_var: CONFIG_DIR_ENV,
                file_var: CONFIG_FILE_ENV,
            });
        }

        // Without USERS_API_CONFIG_DIR the built-in defaults stand in for a
        // missing ./config/default.toml
        let require_default = config_dir.is_some();

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
            require_default,
        })
    }

    /// Loader that reads a single file, ignoring the directory layers
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
            require_default: true,
        }
    }

    /// Loader that performs layered loading from `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
            config_file: None,
            environment: AppEnvironment::from_env(),
            require_default: true,
        }
    }

    /// Override the environment used to pick the overlay file
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load, deserialize and validate settings from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the single file, or `default.toml` of an explicit directory, is missing
    /// - a source cannot be parsed
    /// - the merged settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(ConfigError::Deserialize)?;

        settings.validate()?;

        tracing::debug!(
            environment = %self.environment,
            base_url = %settings.client.base_url,
            "configuration loaded"
        );
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // Environment variables always win
        // USERS_API_CLIENT__BASE_URL -> client.base_url
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, self.require_default)?;

        let env_path = self.config_dir.join(self.environment.overlay_file());
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// `USERS_API_` prefixed variables, `__` separating nested keys
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that touch process environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores every touched environment variable on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clean_env() -> EnvGuard {
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove(AppEnvironment::ENV_VAR);
        env.remove("USERS_API_CLIENT__BASE_URL");
        env.remove("USERS_API_CLIENT__TIMEOUT_SECS");
        env.remove("USERS_API_LOGGER__LEVEL");
        env
    }

    #[test]
    fn test_new_uses_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert!(!loader.require_default);
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_explicit_config_dir_requires_default_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        let dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        let loader = ConfigLoader::new().expect("Should create loader");
        assert!(loader.require_default);
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_default_dir_without_files_uses_builtin_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set("USERS_API_LOGGER__LEVEL", "warn");

        let dir = setup_config_dir(&[]);
        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Development,
            require_default: false,
        };

        let settings = loader.load().expect("Built-in defaults should load");
        assert_eq!(settings.client, crate::config::ClientConfig::default());
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_new_reads_environment_variables() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set(CONFIG_FILE_ENV, "/etc/users-api/client.toml");
        env.set(AppEnvironment::ENV_VAR, "prod");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(
            loader.config_file,
            Some(PathBuf::from("/etc/users-api/client.toml"))
        );
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_new_rejects_dir_and_file_together() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/custom/config/client.toml");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::ConflictingSources { .. })
        ));
    }

    #[test]
    fn test_layered_loading_precedence() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let dir = setup_config_dir(&[
            (
                "default.toml",
                "[client]\nbase_url = \"https://reqres.in/api\"\ntimeout_secs = 30\n\n[logger]\nlevel = \"info\"\n",
            ),
            ("staging.toml", "[client]\nbase_url = \"https://staging.example.com/api\"\n"),
            ("local.toml", "[logger]\nlevel = \"debug\"\n"),
        ]);

        let settings = ConfigLoader::from_dir(dir.path())
            .with_environment(AppEnvironment::Staging)
            .load()
            .unwrap();

        assert_eq!(settings.client.base_url, "https://staging.example.com/api");
        assert_eq!(settings.client.timeout_secs, 30);
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_env_overrides_files() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set("USERS_API_CLIENT__TIMEOUT_SECS", "45");
        env.set("USERS_API_CLIENT__BASE_URL", "http://localhost:9000");

        let dir = setup_config_dir(&[("default.toml", "[client]\ntimeout_secs = 30\n")]);
        let settings = ConfigLoader::from_dir(dir.path()).load().unwrap();

        assert_eq!(settings.client.timeout_secs, 45);
        assert_eq!(settings.client.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_missing_default_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let dir = setup_config_dir(&[]);
        let err = ConfigLoader::from_dir(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(ref path) if path.ends_with("default.toml")));
    }

    #[test]
    fn test_single_file_mode() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let dir = setup_config_dir(&[(
            "client.toml",
            "[client]\nbase_url = \"https://api.example.com\"\n\n[logger]\nformat = \"json\"\n",
        )]);
        let settings = ConfigLoader::from_file(dir.path().join("client.toml"))
            .load()
            .unwrap();

        assert_eq!(settings.client.base_url, "https://api.example.com");
        assert_eq!(settings.logger.format, "json");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let dir = setup_config_dir(&[("default.toml", "[client]\nconnect_timeout_secs = 0\n")]);
        match ConfigLoader::from_dir(dir.path()).load() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "client.connect_timeout_secs")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_fails_deserialization() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let dir = setup_config_dir(&[("default.toml", "[client]\ntimeout_secs = \"soon\"\n")]);
        assert!(matches!(
            ConfigLoader::from_dir(dir.path()).load(),
            Err(ConfigError::Deserialize(_))
        ));
    }
}
