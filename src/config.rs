//! Environment configuration for the ledger provider.
//!
//! Values are read once into a [`ProviderConfig`]; nothing here is global.

use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ExchangeError;

/// URL of the ledger node API.
pub const NODE_URL_VAR: &str = "MINTER_NODE_URL";
/// Chain the node belongs to: `1` for mainnet, `2` for testnet.
pub const CHAIN_ID_VAR: &str = "MINTER_CHAIN_ID";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Env variable not found: {0}")]
    MissingVar(String),

    #[error("Env variable {0} is not valid unicode")]
    NotUnicode(String),
}

impl From<ConfigError> for ExchangeError {
    fn from(err: ConfigError) -> Self {
        ExchangeError::Config(err.to_string())
    }
}

/// Returns a required environment variable.
pub fn get_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|e| match e {
        VarError::NotPresent => ConfigError::MissingVar(name.to_string()),
        VarError::NotUnicode(_) => ConfigError::NotUnicode(name.to_string()),
    })
}

/// Loads variables from an env file into the process environment, without overriding ones already set.
///
/// With no path, `.env` is looked up from the current directory upwards. A missing or unreadable file is not an error; returns whether a file was loaded.
pub fn load_env_file(path: Option<&Path>) -> bool {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment file");
            true
        }
        Err(err) => {
            debug!(error = %err, "no environment file loaded");
            false
        }
    }
}

/// Settings the ledger provider starts from. Missing values are kept as `None`; the provider decides what they mean for its status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub node_url: Option<String>,
    pub chain_id: Option<String>,
}

impl ProviderConfig {
    pub fn new(node_url: Option<String>, chain_id: Option<String>) -> Self {
        Self { node_url, chain_id }
    }

    /// Reads [`NODE_URL_VAR`] and [`CHAIN_ID_VAR`].
    pub fn from_env() -> Self {
        let node_url = match get_var(NODE_URL_VAR) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(error = %err, "ledger node URL is not configured");
                None
            }
        };

        Self {
            node_url,
            chain_id: get_var(CHAIN_ID_VAR).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns distinct variable names: test threads share the process environment.

    #[test]
    fn test_get_var_present() {
        env::set_var("EXCHANGE_CORE_TEST_PRESENT", "http://localhost:8843");
        assert_eq!(
            get_var("EXCHANGE_CORE_TEST_PRESENT").unwrap(),
            "http://localhost:8843"
        );
    }

    #[test]
    fn test_get_var_missing() {
        assert_eq!(
            get_var("EXCHANGE_CORE_TEST_NEVER_SET"),
            Err(ConfigError::MissingVar("EXCHANGE_CORE_TEST_NEVER_SET".to_string()))
        );
    }

    #[test]
    fn test_load_env_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXCHANGE_CORE_TEST_FROM_FILE=from-file\n").unwrap();

        assert!(load_env_file(Some(&path)));
        assert_eq!(get_var("EXCHANGE_CORE_TEST_FROM_FILE").unwrap(), "from-file");
    }

    #[test]
    fn test_load_env_file_keeps_existing_values() {
        env::set_var("EXCHANGE_CORE_TEST_ALREADY_SET", "from-process");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXCHANGE_CORE_TEST_ALREADY_SET=from-file\n").unwrap();

        assert!(load_env_file(Some(&path)));
        assert_eq!(
            get_var("EXCHANGE_CORE_TEST_ALREADY_SET").unwrap(),
            "from-process"
        );
    }

    #[test]
    fn test_load_env_file_missing_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!load_env_file(Some(&dir.path().join("absent.env"))));
    }

    #[test]
    fn test_config_error_converts() {
        let err: ExchangeError = ConfigError::MissingVar("X".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Env variable not found: X");
    }

    #[test]
    fn test_provider_config_from_env() {
        env::set_var(NODE_URL_VAR, "http://localhost:8843");
        env::set_var(CHAIN_ID_VAR, "2");

        let config = ProviderConfig::from_env();
        assert_eq!(config.node_url.as_deref(), Some("http://localhost:8843"));
        assert_eq!(config.chain_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new(Some("http://node".to_string()), None);
        assert_eq!(config.node_url.as_deref(), Some("http://node"));
        assert!(config.chain_id.is_none());
        assert_eq!(ProviderConfig::default(), ProviderConfig::new(None, None));
    }
}
