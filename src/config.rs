use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8020";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global configuration at ~/.config/keepday/config.toml
///
/// The `KEEPDAY_SERVER` environment variable overrides the configured
/// event-store URL.
#[derive(Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            server_url: default_server_url(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("keepday");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is missing.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content)?
            }
            _ => GlobalConfig::default(),
        };

        if let Ok(url) = std::env::var("KEEPDAY_SERVER") {
            if !url.is_empty() {
                config.server_url = url;
            }
        }

        Ok(config)
    }
}
