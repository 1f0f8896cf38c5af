//! Configuration file.
//!
//! Looked up at the path given on the command line, else `./arogya.yaml`
//! when it exists, else defaults. Every field is optional.

use crate::summary::DEFAULT_ENDPOINT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "arogya.yaml";
pub const DEFAULT_STORE_FILE: &str = "arogya-db.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Report-summarization endpoint
    pub summary_endpoint: Url,
    /// JSON file backing the record store
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_endpoint: default_endpoint(),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

impl Config {
    /// Load the config.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.summary_endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.store_path, PathBuf::from("arogya-db.json"));
    }

    #[test]
    fn test_partial_override() {
        let config =
            Config::from_yaml("store_path: /var/lib/arogya/db.json\n").unwrap();
        assert_eq!(config.store_path, PathBuf::from("/var/lib/arogya/db.json"));
        assert_eq!(config.summary_endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_url_and_unknown_field() {
        assert!(Config::from_yaml("summary_endpoint: not a url\n").is_err());
        assert!(Config::from_yaml("stor_path: db.json\n").is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let path = dir.path().join("arogya.yaml");
        std::fs::write(&path, "summary_endpoint: http://localhost:8000/api/upload-report/\n")
            .unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.summary_endpoint.port(), Some(8000));
    }
}
