//! Wallet configuration with TOML file support.

use std::path::Path;
use std::time::Duration;

use pchain_types::{Address, AddressSet, TypesError};
use pchain_utils::{LogFormat, LoggingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::BuildOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("address #{index} is invalid: {source}")]
    InvalidAddress {
        index: usize,
        #[source]
        source: TypesError,
    },

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Configuration for a wallet that builds platform-chain transactions.
///
/// Loaded from TOML via [`WalletConfig::from_toml_file`] or built directly
/// in tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Controlled addresses, hex encoded.
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Upper bound on each backend call, in seconds.
    #[serde(default)]
    pub backend_timeout_secs: Option<u64>,

    /// Memo attached to every built transaction.
    #[serde(default)]
    pub memo: Option<String>,

    /// "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Filter directive, e.g. "info" or "pchain_wallet_core=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            backend_timeout_secs: None,
            memo: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl WalletConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse the configured addresses.
    pub fn address_set(&self) -> Result<AddressSet, ConfigError> {
        self.addresses
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Address::from_hex(s).map_err(|source| ConfigError::InvalidAddress { index, source })
            })
            .collect()
    }

    /// Build options carrying the configured memo and timeout.
    pub fn build_options(&self) -> BuildOptions {
        let mut options = BuildOptions::new();
        if let Some(memo) = &self.memo {
            options = options.with_memo(memo.as_bytes().to_vec());
        }
        if let Some(secs) = self.backend_timeout_secs {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        options
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        Ok(self.log_format.parse()?)
    }

    /// Install the global subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        pchain_utils::try_init_logging(self.log_format()?, &self.log_level)?;
        Ok(())
    }
}
