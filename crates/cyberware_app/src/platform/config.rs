//! Optional RON configuration for the terminal front-end.
//!
//! Read from `./cyberware.ron`, or from the path in `CYBERWARE_CONFIG`.
//! A missing file is not an error; every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "CYBERWARE_CONFIG";
const CONFIG_FILENAME: &str = "cyberware.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub backend: Backend,
    pub submit_latency_ms: u64,
    pub poll_interval_ms: u64,
    pub poll_increment: u8,
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            backend: Backend::Simulated,
            submit_latency_ms: 2000,
            poll_interval_ms: 500,
            poll_increment: 10,
            tick_ms: 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Backend {
    #[default]
    Simulated,
    Http {
        base_url: String,
        #[serde(default = "default_request_timeout_ms")]
        request_timeout_ms: u64,
    },
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl AppConfig {
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Config file location: `$CYBERWARE_CONFIG` if set, else `./cyberware.ron`.
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(".").join(CONFIG_FILENAME),
    }
}

/// Returns `Ok(None)` when the file does not exist.
pub fn load_from(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load_from, AppConfig, Backend, ConfigError};

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from(&dir.path().join("absent.ron")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyberware.ron");
        fs::write(&path, "(poll_interval_ms: 250, log_level: \"debug\")").unwrap();

        let config = load_from(&path).unwrap().unwrap();
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.submit_latency_ms, 2000);
        assert_eq!(config.poll_increment, 10);
        assert_eq!(config.backend, Backend::Simulated);
    }

    #[test]
    fn http_backend_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyberware.ron");
        fs::write(
            &path,
            "(backend: Http(base_url: \"https://scan.example.com\"))",
        )
        .unwrap();

        let config = load_from(&path).unwrap().unwrap();
        assert_eq!(
            config.backend,
            Backend::Http {
                base_url: "https://scan.example.com".to_string(),
                request_timeout_ms: 30_000,
            }
        );
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyberware.ron");
        fs::write(&path, "(poll_interval_ms: \"soon\")").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn intervals_never_collapse_to_zero() {
        let config = AppConfig {
            poll_interval_ms: 0,
            tick_ms: 0,
            ..AppConfig::default()
        };
        assert!(!config.poll_interval().is_zero());
        assert!(!config.tick_interval().is_zero());
    }
}
