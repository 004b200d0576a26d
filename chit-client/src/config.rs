//! Client-side configuration loading
//!
//! Reads `config.toml` from the platform config directory
//! ([`chit_utils::config_file`]). A missing or broken file never stops
//! the client; it falls back to defaults.

use std::collections::HashMap;
use std::path::Path;

/// Channel new sessions start in unless configured otherwise
pub const DEFAULT_CHANNEL: &str = "general";

/// Port used when an address does not name one
pub const DEFAULT_PORT: u16 = 4000;

/// Client configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Channel shown in the divider before any `/join`
    pub default_channel: String,
    pub default_port: u16,
    /// Username to log in with instead of prompting
    pub username: Option<String>,
    /// Named server addresses, e.g. `home = "tcp://192.168.1.5:4000"`
    pub remotes: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_channel: DEFAULT_CHANNEL.into(),
            default_port: DEFAULT_PORT,
            username: None,
            remotes: HashMap::new(),
        }
    }
}

/// Load configuration from the standard location
pub fn load() -> ClientConfig {
    load_from(&chit_utils::config_file())
}

/// Load configuration from `path`
///
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_from(path: &Path) -> ClientConfig {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return ClientConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<ClientConfig>(&content) {
            Ok(config) => {
                tracing::debug!(
                    "Loaded config: default_channel={}, default_port={}, remotes={}",
                    config.default_channel,
                    config.default_port,
                    config.remotes.len()
                );
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}, using defaults", e);
                ClientConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            ClientConfig::default()
        }
    }
}
