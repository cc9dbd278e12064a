//! Formation catalog
//!
//! The catalog is static configuration: one table per game mode mapping a key
//! ("442") to a [`FormationDescriptor`]. The built-in table is embedded at
//! compile time and parsed once.
//!
//! ```rust
//! use lineup_core::catalog::FormationCatalog;
//! use lineup_core::models::GameMode;
//!
//! let catalog = FormationCatalog::builtin();
//! let formation = catalog.get(GameMode::ElevenASide, "442").unwrap();
//! assert_eq!(formation.player_count(), 11);
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};
use crate::models::{FormationDescriptor, GameMode};

// =============================================================================
// Embedded Data
// =============================================================================

/// Built-in formation table (compile-time embedding)
pub const FORMATIONS_YAML: &str = include_str!("../data/formations.yaml");

pub const CATALOG_VERSION: u32 = 1;

static BUILTIN: OnceLock<FormationCatalog> = OnceLock::new();

// =============================================================================
// Types
// =============================================================================

/// Formations available in one game mode, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeCatalog {
    pub mode: GameMode,
    /// Key selected when nothing else is requested
    pub default: String,
    pub formations: Vec<FormationDescriptor>,
}

impl ModeCatalog {
    pub fn get(&self, key: &str) -> Option<&FormationDescriptor> {
        self.formations.iter().find(|f| f.key == key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationCatalog {
    pub version: u32,
    pub modes: Vec<ModeCatalog>,
}

impl FormationCatalog {
    /// Parse a catalog without validating it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The embedded catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded YAML does not parse. Debug builds also panic if
    /// it fails [`FormationCatalog::validate`]; both are data defects caught
    /// by the test suite.
    pub fn builtin() -> &'static FormationCatalog {
        BUILTIN.get_or_init(|| {
            let catalog = Self::from_yaml_str(FORMATIONS_YAML)
                .expect("Failed to parse embedded formations.yaml");
            if cfg!(debug_assertions) {
                if let Err(err) = catalog.validate() {
                    panic!("Embedded formation catalog is invalid: {err}");
                }
            }
            catalog
        })
    }

    pub fn mode(&self, mode: GameMode) -> Result<&ModeCatalog> {
        self.modes
            .iter()
            .find(|m| m.mode == mode)
            .ok_or_else(|| LineupError::UnknownMode(mode.to_string()))
    }

    pub fn get(&self, mode: GameMode, key: &str) -> Result<&FormationDescriptor> {
        self.mode(mode)?
            .get(key)
            .ok_or_else(|| LineupError::UnknownFormation { mode, key: key.to_string() })
    }

    pub fn contains(&self, mode: GameMode, key: &str) -> bool {
        self.get(mode, key).is_ok()
    }

    pub fn keys(&self, mode: GameMode) -> Vec<&str> {
        self.mode(mode)
            .map(|m| m.formations.iter().map(|f| f.key.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn default_key(&self, mode: GameMode) -> Result<&str> {
        Ok(self.mode(mode)?.default.as_str())
    }

    /// Check every formation against its mode's roster size.
    ///
    /// Rules:
    /// 1. Each mode appears at most once
    /// 2. Keys are unique within a mode and the default key exists
    /// 3. The first line is a single goalkeeper
    /// 4. Player total equals the roster size
    /// 5. Every x lies within 0-100
    pub fn validate(&self) -> Result<()> {
        if self.version > CATALOG_VERSION {
            log::warn!(
                "Formation catalog version {} is newer than supported {}",
                self.version,
                CATALOG_VERSION
            );
        }

        let mut seen_modes = HashSet::new();
        for table in &self.modes {
            if !seen_modes.insert(table.mode) {
                return Err(LineupError::InvalidFormation(format!(
                    "mode {} is declared twice",
                    table.mode
                )));
            }

            let mut seen_keys = HashSet::new();
            for formation in &table.formations {
                if !seen_keys.insert(formation.key.as_str()) {
                    return Err(LineupError::InvalidFormation(format!(
                        "duplicate key '{}' in {}",
                        formation.key, table.mode
                    )));
                }
                validate_formation(table.mode, formation)?;
            }

            if table.get(&table.default).is_none() {
                return Err(LineupError::UnknownFormation {
                    mode: table.mode,
                    key: table.default.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Validate a single descriptor against a mode.
pub fn validate_formation(mode: GameMode, formation: &FormationDescriptor) -> Result<()> {
    match formation.lines.first() {
        Some(line) if line.len() == 1 => {}
        _ => {
            return Err(LineupError::InvalidFormation(format!(
                "{} '{}' must start with a single goalkeeper",
                mode, formation.key
            )))
        }
    }

    let found = formation.player_count();
    if found != mode.roster_size() {
        return Err(LineupError::InvalidTeamSize {
            mode,
            key: formation.key.clone(),
            expected: mode.roster_size(),
            found,
        });
    }

    if formation.lines.iter().flatten().any(|x| !(0.0..=100.0).contains(x)) {
        return Err(LineupError::InvalidFormation(format!(
            "{} '{}' has a position outside 0-100",
            mode, formation.key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FormationCatalog::builtin();
        catalog.validate().unwrap();
        for mode in GameMode::all() {
            assert!(catalog.mode(mode).is_ok(), "{mode} missing from catalog");
        }
    }

    #[test]
    fn test_every_formation_matches_roster() {
        let catalog = FormationCatalog::builtin();
        for table in &catalog.modes {
            for formation in &table.formations {
                assert_eq!(
                    formation.player_count(),
                    table.mode.roster_size(),
                    "{} formation {} has the wrong player count",
                    table.mode,
                    formation.key
                );
            }
        }
    }

    #[test]
    fn test_mode_contents() {
        let catalog = FormationCatalog::builtin();
        assert!(catalog.keys(GameMode::ElevenASide).len() >= 23);
        assert_eq!(catalog.default_key(GameMode::ElevenASide).unwrap(), "442");

        let seven = catalog.keys(GameMode::SevenASide);
        assert_eq!(seven.len(), 7);
        assert!(seven.contains(&"321"));
        assert!(!seven.contains(&"322"));

        assert!(catalog.contains(GameMode::SixASide, "212"));
    }

    #[test]
    fn test_unknown_key() {
        let catalog = FormationCatalog::builtin();
        let err = catalog.get(GameMode::SixASide, "442").unwrap_err();
        assert!(matches!(err, LineupError::UnknownFormation { .. }));
    }

    #[test]
    fn test_wrong_size_formation_rejected() {
        let yaml = r#"
version: 1
modes:
  - mode: "7v7"
    default: "33"
    formations:
      - { key: "33", label: "3-3", lines: [[50], [20, 50, 80], [20, 50, 80]] }
      - { key: "322", label: "3-2-2", lines: [[50], [20, 50, 80], [30, 70], [30, 70]] }
"#;
        let catalog = FormationCatalog::from_yaml_str(yaml).unwrap();
        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            LineupError::InvalidTeamSize { expected: 7, found: 8, .. }
        ));
        assert!(err.is_catalog_defect());
    }

    #[test]
    fn test_missing_goalkeeper_line_rejected() {
        let formation =
            FormationDescriptor::new("x", "x", vec![vec![40.0, 60.0], vec![20.0, 50.0, 80.0]]);
        let err = validate_formation(GameMode::SixASide, &formation).unwrap_err();
        assert!(matches!(err, LineupError::InvalidFormation(_)));
    }

    #[test]
    fn test_missing_default_rejected() {
        let yaml = r#"
version: 1
modes:
  - mode: "6v6"
    default: "99"
    formations:
      - { key: "23", label: "2-3", lines: [[50], [25, 75], [12, 50, 88]] }
"#;
        let catalog = FormationCatalog::from_yaml_str(yaml).unwrap();
        assert!(matches!(catalog.validate(), Err(LineupError::UnknownFormation { .. })));
    }
}
