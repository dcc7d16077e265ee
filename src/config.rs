//! Storage configuration parsing.
//!
//! ```toml
//! namespace = "app"
//! separator = ":"
//!
//! [persistence]
//! session-token = false
//! onboarding-done = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::adaptor::DEFAULT_SEPARATOR;

/// Storage configuration loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Prefix isolating this application's keys in a shared adaptor.
    pub namespace: Option<String>,
    /// Placed between namespace and key.
    pub separator: String,
    /// Persistence overrides, keyed by storage name.
    pub persistence: BTreeMap<String, bool>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            persistence: BTreeMap::new(),
        }
    }
}

impl StorageConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
namespace = "app"
separator = ":"

[persistence]
session-token = false
onboarding-done = true
"#;
        let config = StorageConfig::from_str(toml).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("app"));
        assert_eq!(config.separator, ":");
        assert_eq!(config.persistence.len(), 2);
        assert_eq!(config.persistence.get("session-token"), Some(&false));
        assert_eq!(config.persistence.get("onboarding-done"), Some(&true));
    }

    #[test]
    fn test_defaults() {
        let config = StorageConfig::from_str("").unwrap();
        assert_eq!(config, StorageConfig::default());
        assert_eq!(config.separator, "_");
        assert!(config.namespace.is_none());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            StorageConfig::from_str("namesapce = \"typo\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = StorageConfig::from_file("/nonexistent/reactive-kv.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/reactive-kv.toml"));
    }
}
