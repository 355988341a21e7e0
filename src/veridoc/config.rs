use crate::error::{Result, VeridocError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "VERIDOC_API_URL";

/// Configuration for veridoc, stored in the data directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VeridocConfig {
    /// Base URL for the remote verification backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seed empty collections with demo data. Turn off for a production
    /// build that should only ever show real records.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for VeridocConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            seed_demo_data: true,
        }
    }
}

impl VeridocConfig {
    /// Load config from the given directory, or return defaults if not
    /// found. The `VERIDOC_API_URL` environment variable wins over the
    /// file in either case.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(VeridocError::Io)?;
            serde_json::from_str(&content).map_err(VeridocError::Serialization)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VeridocError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VeridocError::Serialization)?;
        fs::write(config_path, content).map_err(VeridocError::Io)?;
        Ok(())
    }
}
