//! Configuration loading and typed config structures for the server.
//!
//! The canonical configuration lives in `corral-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads the file. A
//! missing file or key falls back to the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yaml::Error,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
///
/// Mirrors the structure of `corral-config.yaml`. All fields have
/// defaults matching the demo setup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CorralConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Counter channel settings.
    #[serde(default)]
    pub counter: CounterSection,

    /// Static photo settings.
    #[serde(default)]
    pub photos: PhotosSection,
}

impl CorralConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Counter channel configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterSection {
    /// Milliseconds between random-walk broadcasts.
    #[serde(default = "default_counter_interval_ms")]
    pub interval_ms: u64,

    /// Lower bound (inclusive) of the random starting value.
    #[serde(default = "default_counter_seed_min")]
    pub seed_min: i64,

    /// Upper bound (exclusive) of the random starting value.
    #[serde(default = "default_counter_seed_max")]
    pub seed_max: i64,

    /// Probability that a step increments rather than decrements.
    #[serde(default = "default_counter_step_up_probability")]
    pub step_up_probability: f64,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            interval_ms: default_counter_interval_ms(),
            seed_min: default_counter_seed_min(),
            seed_max: default_counter_seed_max(),
            step_up_probability: default_counter_step_up_probability(),
        }
    }
}

/// Static photo configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotosSection {
    /// Directory served under `/unicorns/photos`.
    #[serde(default = "default_photos_directory")]
    pub directory: PathBuf,

    /// Public base URL used when building fixture photo links.
    #[serde(default = "default_photos_base_url")]
    pub base_url: String,
}

impl Default for PhotosSection {
    fn default() -> Self {
        Self {
            directory: default_photos_directory(),
            base_url: default_photos_base_url(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    3000
}

fn default_counter_interval_ms() -> u64 {
    300
}

fn default_counter_seed_min() -> i64 {
    0
}

fn default_counter_seed_max() -> i64 {
    1000
}

fn default_counter_step_up_probability() -> f64 {
    0.8
}

fn default_photos_directory() -> PathBuf {
    PathBuf::from("resources/photos")
}

fn default_photos_base_url() -> String {
    String::from("http://localhost:3000")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = CorralConfig::parse("{}").unwrap();
        assert_eq!(config, CorralConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.counter.interval_ms, 300);
    }

    #[test]
    fn partial_sections_keep_unset_defaults() {
        let config = CorralConfig::parse("server:\n  port: 8080\ncounter:\n  seed_max: 10\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.counter.seed_max, 10);
        assert_eq!(config.counter.seed_min, 0);
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let config = CorralConfig::parse("extra: true\n").unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
