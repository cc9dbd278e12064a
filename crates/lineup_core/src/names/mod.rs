// Player name state: the NameRecord, its seed fallbacks, and reconciliation
// across share links and the persisted store

pub mod record;
pub mod seed;
pub mod source;
pub mod sync;


pub use record::NameRecord;
pub use seed::{SeedNames, DEFAULT_SEED_NAMES};
pub use source::{
    resolve_initial_state, Resolution, RestoredState, ShareLinkSource, StateOrigin, StateSource,
};
pub use sync::{normalize_name, NameSynchronizer};
