// Standard library
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError, Environment, File};
use log::{error, info, LevelFilter};
use tokio::sync::RwLock;

// Current module imports
use super::constants::{default_log_level, CONFIG_PATH_ENV, DEFAULT_CONFIG, ENV_PREFIX};
use super::errors::ValidationError;
use super::types::{ConfigManager, Log, Settings, ValidatedSettings};

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        // Validate rate limit
        if self.rate_limit.max_requests == 0 {
            return Err(ValidationError::InvalidMaxRequests);
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ValidationError::InvalidWindow);
        }

        self.crpt.validate()?;

        if !self.submission.documents.is_empty() && self.submission.signature.trim().is_empty() {
            return Err(ValidationError::MissingSignature);
        }

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the configuration.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = Self::get_config_path()?;
        Self::ensure_config_file_exists(&config_path)?;

        let settings: Settings = Self::load_settings(&config_path)?;

        // Validate settings before proceeding
        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        let manager = ConfigManager {
            settings: Arc::new(RwLock::new(validated_settings.into_inner())),
            config_path,
        };

        manager.adjust_logging_level().await;

        Ok(manager)
    }

    /// Determines the configuration file path.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("crpt-api").join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file and environment variables.
    fn load_settings(config_path: &Path) -> Result<Settings, ConfigError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Adjusts the logging level based on the configuration.
    async fn adjust_logging_level(&self) {
        let level: String = self.get_log_level().await;
        let level_filter: LevelFilter = match level.as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        log::set_max_level(level_filter);
    }

    /// Provides a read-locked reference to the current settings.
    pub async fn get_settings(&self) -> tokio::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().await
    }

    pub async fn get_log_level(&self) -> String {
        self.settings.read().await.get_log_level()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use config::FileFormat;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let settings = parse(DEFAULT_CONFIG);

        assert!(settings.validate().is_ok());
        assert_eq!(settings.rate_limit.max_requests, 10);
        assert_eq!(settings.rate_limit.window_secs, 1);
        assert!(!settings.crpt.accept_invalid_certs);
        assert!(settings.submission.documents.is_empty());
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let settings = parse("[log]\nlevel = \"DEBUG\"\n");

        assert_eq!(settings.get_log_level(), "debug");
        assert_eq!(settings.rate_limit.max_requests, 10);
        assert_eq!(settings.crpt.timeout_secs, 30);
        assert!(ValidatedSettings::new(settings).is_ok());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = parse("[log]\nlevel = \"loud\"\n");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));

        let settings = parse("[rate_limit]\nmax_requests = 0\nwindow_secs = 1\n");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidMaxRequests)
        ));

        let settings = parse("[rate_limit]\nmax_requests = 5\nwindow_secs = 0\n");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidWindow)
        ));

        let settings = parse("[submission]\ndocuments = [\"doc.json\"]\n");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::MissingSignature)
        ));

        let settings = parse("[crpt]\ntimeout_secs = 0\n");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::CrptConfig(_))
        ));
    }
}
