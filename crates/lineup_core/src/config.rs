//! # Board configuration
//!
//! Storage keys, share link settings and name fallbacks. Every field has a
//! default, so a config file only needs the values it changes.
//!
//! ```rust
//! use lineup_core::config::LineupConfig;
//!
//! let config = LineupConfig::from_yaml_str("share_base_url: https://lineup.example").unwrap();
//! assert_eq!(config.storage_key, "playerNames");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::names::{SeedNames, DEFAULT_SEED_NAMES};
use crate::share::SHARE_PARAM;
use crate::store::{LEGACY_NAMES_KEY, NAMES_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    /// Store key for the NameRecord (default "playerNames")
    pub storage_key: String,
    /// Older per-side array key, migrated on first load
    pub legacy_storage_key: String,

    // === Share links ===
    /// Site root that mode pages hang off
    pub share_base_url: String,
    /// Query parameter carrying the code (default "d")
    pub share_param: String,

    // === Fallback names ===
    /// Home names shown for Unset slots, cycled by index
    pub seed_names: Vec<String>,
    /// Shown for Unset away slots
    pub away_placeholder: String,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            storage_key: NAMES_KEY.to_string(),
            legacy_storage_key: LEGACY_NAMES_KEY.to_string(),

            share_base_url: "https://lineup.example".to_string(),
            share_param: SHARE_PARAM.to_string(),

            seed_names: DEFAULT_SEED_NAMES.iter().map(|name| name.to_string()).collect(),
            away_placeholder: String::new(),
        }
    }
}

impl LineupConfig {
    /// No seed names: every Unset home slot reads "PLAYER N".
    pub fn without_seeds() -> Self {
        Self { seed_names: Vec::new(), ..Self::default() }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn seeds(&self) -> SeedNames {
        SeedNames::new(self.seed_names.iter().cloned())
    }
}
