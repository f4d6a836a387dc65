/// Application configuration
///
/// Stored as JSON in the user's config directory
/// (`~/.config/folio/config.json` on Linux). A missing file means defaults;
/// command line flags override individual fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::state::expansion::AUTO_ADVANCE_INTERVAL;

/// Longest accepted auto-advance period, in seconds
pub const MAX_AUTO_ADVANCE_SECS: u64 = 3600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("auto_advance_secs must be at least 1")]
    ZeroInterval,

    #[error("auto_advance_secs must be at most {MAX_AUTO_ADVANCE_SECS}, got {0}")]
    IntervalTooLong(u64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root that catalog image paths resolve against
    pub assets_dir: PathBuf,
    /// Directory of content pages
    pub pages_dir: PathBuf,
    /// Catalog JSON to use instead of the embedded one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Zoom overlay auto-advance period
    pub auto_advance_secs: u64,
    pub theme: ThemeChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("public"),
            pages_dir: PathBuf::from("content/pages"),
            catalog: None,
            auto_advance_secs: AUTO_ADVANCE_INTERVAL.as_secs(),
            theme: ThemeChoice::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("folio");
        path.push("config.json");
        Some(path)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_advance_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.auto_advance_secs > MAX_AUTO_ADVANCE_SECS {
            return Err(ConfigError::IntervalTooLong(self.auto_advance_secs));
        }
        Ok(())
    }

    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_secs(self.auto_advance_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/folio/config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.auto_advance_interval(), AUTO_ADVANCE_INTERVAL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"assets_dir": "/srv/site", "theme": "dark"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("/srv/site"));
        assert_eq!(config.theme, ThemeChoice::Dark);
        assert_eq!(config.pages_dir, PathBuf::from("content/pages"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auto_advance_secs": 0}"#).unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_huge_interval_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auto_advance_secs": 18446744073709551615}"#).unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::IntervalTooLong(u64::MAX))
        ));

        let config = Config {
            auto_advance_secs: MAX_AUTO_ADVANCE_SECS,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
