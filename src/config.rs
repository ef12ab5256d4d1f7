//! Engine configuration
//!
//! Defaults come from the environment (`EXPLORE_CHAT_*`); a YAML file can
//! override any field.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::matcher::DEFAULT_FUZZY_THRESHOLD;

pub const ENV_FUZZY_THRESHOLD: &str = "EXPLORE_CHAT_FUZZY_THRESHOLD";
pub const ENV_DATA_PATH: &str = "EXPLORE_CHAT_DATA";
pub const ENV_BIND_ADDR: &str = "EXPLORE_CHAT_BIND";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration for the chat engine and its binaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum similarity (0-100) for a fuzzy match
    pub fuzzy_threshold: u8,
    /// Dataset to import at startup
    pub data_path: Option<PathBuf>,
    /// Listen address for the HTTP server
    pub bind_addr: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: std::env::var(ENV_FUZZY_THRESHOLD)
                .ok()
                .and_then(|s| s.trim().parse::<u8>().ok())
                .filter(|t| *t <= 100)
                .unwrap_or(DEFAULT_FUZZY_THRESHOLD),
            data_path: std::env::var(ENV_DATA_PATH).ok().map(PathBuf::from),
            bind_addr: std::env::var(ENV_BIND_ADDR)
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

/// On-disk form; every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    fuzzy_threshold: Option<i64>,
    data_path: Option<PathBuf>,
    bind_addr: Option<String>,
}

impl EngineConfig {
    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Apply overrides from a YAML document on top of `self`
    pub fn merge_yaml(mut self, yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        if let Some(threshold) = file.fuzzy_threshold {
            self.fuzzy_threshold = u8::try_from(threshold)
                .ok()
                .filter(|t| *t <= 100)
                .ok_or(ConfigError::InvalidThreshold(threshold))?;
        }
        if let Some(path) = file.data_path {
            self.data_path = Some(path);
        }
        if let Some(addr) = file.bind_addr {
            self.bind_addr = addr;
        }
        Ok(self)
    }

    /// Environment defaults overridden by a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::default().merge_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuzzy_threshold > 100 {
            return Err(ConfigError::InvalidThreshold(self.fuzzy_threshold as i64));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base() -> EngineConfig {
        EngineConfig {
            fuzzy_threshold: 70,
            data_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    #[test]
    fn test_merge_yaml_overrides() {
        let config = base()
            .merge_yaml("fuzzy_threshold: 85\ndata_path: data/sesotho.json\n")
            .unwrap();
        assert_eq!(config.fuzzy_threshold, 85);
        assert_eq!(config.data_path, Some(PathBuf::from("data/sesotho.json")));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_merge_empty_yaml_keeps_values() {
        assert_eq!(base().merge_yaml("").unwrap(), base());
    }

    #[test]
    fn test_threshold_out_of_range() {
        assert!(matches!(
            base().merge_yaml("fuzzy_threshold: 140"),
            Err(ConfigError::InvalidThreshold(140))
        ));
        assert!(matches!(
            base().merge_yaml("fuzzy_threshold: -1"),
            Err(ConfigError::InvalidThreshold(-1))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            base().merge_yaml("threshold: 10"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr: 0.0.0.0:8080").unwrap();
        let config = EngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        config.validate().unwrap();
    }
}
