//! Application configuration, read from an optional RON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use search_core::DEFAULT_QUERY;
use search_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "search_app.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to ./search_app.log in current directory.
    File,
    /// Write to terminal (stderr for warnings, stdout otherwise).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub hits_per_page: u32,
    pub default_query: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: fetch.base_url,
            hits_per_page: fetch.hits_per_page,
            default_query: DEFAULT_QUERY.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_response_bytes: fetch.max_bytes,
            state_dir: PathBuf::from("."),
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            hits_per_page: self.hits_per_page,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}

/// Loads the config at `path`, falling back to defaults when the file is absent.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = match fs::read_to_string(path) {
        Ok(text) => ron::from_str(&text)?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => AppConfig::default(),
        Err(err) => return Err(err.into()),
    };
    validate(&config)?;
    Ok(config)
}

pub fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("base_url is required".into()));
    }
    if cfg.hits_per_page == 0 || cfg.hits_per_page > 1000 {
        return Err(ConfigError::Invalid("hits_per_page out of range".into()));
    }
    if cfg.connect_timeout_secs == 0 || cfg.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid("timeouts must be positive".into()));
    }
    if cfg.max_response_bytes == 0 {
        return Err(ConfigError::Invalid("max_response_bytes must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.hits_per_page, 100);
        assert_eq!(cfg.default_query, "redux");
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(hits_per_page: 20, log_destination: Both)").unwrap();

        let cfg = load(&path).unwrap();
        assert_eq!(cfg.hits_per_page, 20);
        assert_eq!(cfg.log_destination, LogDestination::Both);
        assert_eq!(cfg.base_url, AppConfig::default().base_url);
        assert_eq!(cfg.fetch_settings().hits_per_page, 20);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cfg = AppConfig {
            hits_per_page: 0,
            ..AppConfig::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));

        let cfg = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(hits_per_page: \"many\")").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse(_))));
    }
}
