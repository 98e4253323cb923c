//! Configuration loading
//!
//! Settings live in a YAML file passed with `--config` (or `DSAA_CONFIG`). Every field is
//! optional; anything missing falls back to its default:
//!
//! ```yaml
//! client:
//!   endpoint: http://localhost:8080
//!   connect_timeout_ms: 5000
//!   io_timeout_ms: 60000
//! notices:
//!   success_ms: 3000
//!   failure_ms: 5000
//! styles:
//!   error: dsaa-line-error
//!   warning: dsaa-line-warning
//!   info: dsaa-line-info
//! ```

use dsaa_client::ClientConfig;
use dsaa_core::{NoticeDurations, StyleClasses};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DsaaConfig {
    pub client: ClientConfig,
    pub notices: NoticeDurations,
    pub styles: StyleClasses,
}

impl DsaaConfig {
    /// Load config from `path`, or return defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply command-line overrides
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.client.endpoint = endpoint;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsaa_client::DEFAULT_ENDPOINT;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DsaaConfig::from_yaml(
            "client:\n  endpoint: http://debug.internal:9090\nnotices:\n  failure_ms: 8000\n",
        )
        .unwrap();

        assert_eq!(config.client.endpoint, "http://debug.internal:9090");
        assert_eq!(config.client.connect_timeout_ms, 5_000);
        assert_eq!(config.notices.success_ms, 3000);
        assert_eq!(config.notices.failure_ms, 8000);
        assert_eq!(config.styles, StyleClasses::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DsaaConfig::from_yaml("").unwrap(), DsaaConfig::default());
        assert_eq!(DsaaConfig::default().client.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            DsaaConfig::from_yaml("client: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = DsaaConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_endpoint_override() {
        let config = DsaaConfig::default().with_endpoint(Some("http://other:1".to_string()));
        assert_eq!(config.client.endpoint, "http://other:1");
        let config = config.with_endpoint(None);
        assert_eq!(config.client.endpoint, "http://other:1");
    }
}
