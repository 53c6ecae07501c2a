//! Configuration file handling.
//!
//! # Configuration Location
//!
//! - Linux: `~/.config/extlist/config.toml`
//! - macOS: `~/Library/Application Support/extlist/config.toml`
//! - Windows: `%APPDATA%\extlist\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "html"
//! default_browser = "chrome"
//! check_availability = true
//! probe_delay_ms = 50
//! probe_timeout_secs = 5
//!
//! [store]
//! base_url = "https://chrome.google.com"
//! detail_prefixes = ["https://chromewebstore.google.com/detail/"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::checker::{
    AvailabilityProber, OfflineProber, WebStoreProber, DEFAULT_DETAIL_PREFIXES, DEFAULT_STORE_URL,
};
use crate::model::Browser;

/// Application configuration.
///
/// Loaded from a TOML file, with defaults for anything not set. Command line
/// flags override individual fields.
///
/// # Example
///
/// ```no_run
/// use extlist::Config;
///
/// let config = Config::load().unwrap();
/// println!("Probe delay: {} ms", config.probe_delay_ms);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when no `--format` flag is provided.
    ///
    /// Valid values: "html", "json", "table"
    pub default_format: String,

    /// Browser whose default profile is used when no path is given.
    pub default_browser: Browser,

    /// Whether to check store availability at all.
    pub check_availability: bool,

    /// Pause between consecutive store requests, in milliseconds.
    pub probe_delay_ms: u64,

    /// Per-request timeout, in seconds.
    pub probe_timeout_secs: u64,

    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Scheme and host that listing probes are sent to.
    pub base_url: String,

    /// Redirect targets accepted as proof that a listing exists.
    pub detail_prefixes: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORE_URL.to_string(),
            detail_prefixes: DEFAULT_DETAIL_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            default_browser: Browser::Chrome,
            check_availability: true,
            probe_delay_ms: 50,
            probe_timeout_secs: 5,
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file, or defaults if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration, creating the parent directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("extlist")
            .join("config.toml")
    }

    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    pub fn probe_delay(&self) -> Duration {
        Duration::from_millis(self.probe_delay_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Builds the prober this configuration asks for.
    pub fn prober(&self) -> Result<Box<dyn AvailabilityProber>> {
        if !self.check_availability {
            return Ok(Box::new(OfflineProber));
        }

        let store = WebStoreProber::builder()
            .base_url(self.store.base_url.clone())
            .detail_prefixes(self.store.detail_prefixes.clone())
            .timeout(self.probe_timeout())
            .delay(self.probe_delay())
            .build()?;

        Ok(Box::new(store))
    }
}
