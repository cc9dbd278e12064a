use thiserror::Error;

use crate::models::{GameMode, PlayerSlot};
use crate::share::ShareError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Unknown formation '{key}' for {mode}")]
    UnknownFormation { mode: GameMode, key: String },

    #[error("Invalid formation: {0}")]
    InvalidFormation(String),

    #[error("Invalid team size for {mode} formation '{key}': expected {expected}, found {found}")]
    InvalidTeamSize { mode: GameMode, key: String, expected: usize, found: usize },

    #[error("Invalid player slot: {0}")]
    InvalidSlot(String),

    #[error("Slot {slot} is outside the {mode} roster")]
    SlotOutOfRange { slot: PlayerSlot, mode: GameMode },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LineupError {
    /// Catalog defects are static-data bugs, never caused by user input.
    pub fn is_catalog_defect(&self) -> bool {
        matches!(self, LineupError::InvalidFormation(_) | LineupError::InvalidTeamSize { .. })
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
