//! # lineup_core - Formation layout and player-name state
//!
//! Pure logic behind a formation board:
//!
//! - a built-in formation catalog per game mode (6v6 to 11v11)
//! - a layout engine mapping a formation to pitch coordinates (0-100 %)
//! - a name synchronizer that reconciles edits, a persisted key-value store
//!   and compact share links, in that priority order
//!
//! Rendering, image export and clipboard access live outside this crate;
//! [`handoff`] defines what they receive.

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handoff;
pub mod layout;
pub mod models;
pub mod names;
pub mod share;
pub mod store;

pub use board::{Board, PlayerMarker};
pub use catalog::{FormationCatalog, ModeCatalog};
pub use config::LineupConfig;
pub use error::{LineupError, Result};
pub use handoff::{deliver_with_fallback, DeliveryError, DeliveryReceipt, ExportRequest, ShareTarget};
pub use layout::{compute_layout, PlayerPosition};
pub use models::{FormationDescriptor, GameMode, PlayerSlot, Side};
pub use names::{NameRecord, NameSynchronizer, SeedNames, StateOrigin};
pub use share::{decode_share_state, encode_share_state, ShareError, ShareState};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::board::{Board, PlayerMarker};
    pub use crate::catalog::FormationCatalog;
    pub use crate::config::LineupConfig;
    pub use crate::models::{GameMode, PlayerSlot, Side};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
}
