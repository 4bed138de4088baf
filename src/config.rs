//! Tool configuration loading and defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fetch::{self, IANA_REGISTRY_URL, ISO_639_3_URL};

fn default_registry_url() -> String {
    IANA_REGISTRY_URL.to_string()
}

fn default_iso639_url() -> String {
    ISO_639_3_URL.to_string()
}

fn default_cache_dir() -> PathBuf {
    fetch::default_cache_dir()
}

fn default_cache_max_age_days() -> i64 {
    7
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source URL for the language subtag registry
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Source URL for the ISO 639-3 code table
    #[serde(default = "default_iso639_url")]
    pub iso639_url: String,

    /// Download cache directory
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Cached documents older than this are re-downloaded
    #[serde(default = "default_cache_max_age_days")]
    pub cache_max_age_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            iso639_url: default_iso639_url(),
            cache_dir: default_cache_dir(),
            cache_max_age_days: default_cache_max_age_days(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load(".langreg.json").unwrap_or_default()
    }
}
