//! daoboard configuration file handling
//!
//! Provides default configuration generation and loading for the CLI.
//! Configuration files are TOML format, by default under the user's config
//! directory (`~/.config/daoboard/config.toml` on Linux).
//!
//! Every section is optional; missing values fall back to the public
//! AstroDAO indexer and the Brave New Games DAO.

use daoboard::api::client::{AstroDaoClient, DEFAULT_BASE_URL, DEFAULT_DAO_ID};
use daoboard::api::AccountId;
use daoboard::proposals::PAGE_LIMIT;
use daoboard::retry::RetryPolicy;
use daoboard::wallet::{Network, WalletSession};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// daoboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaoboardConfig {
    /// Indexer API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Wallet session configuration
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Indexer API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Indexer base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// DAO contract account to read
    #[serde(default = "default_dao_id")]
    pub dao_id: String,

    /// Proposals per page
    #[serde(default = "default_page_limit")]
    pub page_limit: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts for failed reads (0 = single attempt)
    #[serde(default)]
    pub retries: u32,
}

/// Wallet configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    /// NEAR network (mainnet or testnet)
    #[serde(default)]
    pub network: Network,

    /// Signed-in account (optional; signed out if not set)
    pub account_id: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_dao_id() -> String {
    DEFAULT_DAO_ID.to_string()
}

fn default_page_limit() -> u64 {
    PAGE_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            dao_id: default_dao_id(),
            page_limit: PAGE_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl DaoboardConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: DaoboardConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.api.page_limit == 0 {
            return Err("api.page_limit must be at least 1".into());
        }
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be at least 1".into());
        }
        if self.wallet.account_id.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err("wallet.account_id must not be empty (remove it to sign out)".into());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_retries(self.api.retries)
    }

    /// HTTP client for the configured indexer and DAO
    pub fn client(&self) -> Result<AstroDaoClient, Box<dyn std::error::Error>> {
        Ok(AstroDaoClient::new(
            &self.api.base_url,
            &self.api.dao_id,
            self.timeout(),
        )?)
    }

    /// Wallet session described by the config
    pub fn session(&self) -> WalletSession {
        match &self.wallet.account_id {
            Some(account) => {
                WalletSession::signed_in(self.wallet.network, AccountId::new(account.trim()))
            }
            None => WalletSession::signed_out(self.wallet.network),
        }
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml() -> String {
        format!(
            r#"# daoboard configuration
#
# Every value below is optional; the commented defaults are used when a key
# or a whole section is missing.

[api]
# AstroDAO indexer base URL
base_url = "{base_url}"

# DAO contract account whose proposals are shown
dao_id = "{dao_id}"

# Proposals per page
page_limit = {page_limit}

# Per-request timeout in seconds; an expired request is reported as a network error
timeout_secs = {timeout_secs}

# Extra attempts for failed reads (0 = single attempt)
retries = 0

[wallet]
# NEAR network: "mainnet" or "testnet"
network = "mainnet"

# Signed-in account. Leave commented to browse signed out.
# account_id = "alice.near"

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides this)
level = "info"
"#,
            base_url = DEFAULT_BASE_URL,
            dao_id = DEFAULT_DAO_ID,
            page_limit = PAGE_LIMIT,
            timeout_secs = DEFAULT_TIMEOUT_SECS,
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml();

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daoboard")
        .join("config.toml")
}
