//! State sources and initial-state resolution
//!
//! Priority on startup: inbound share link > persisted names > seeds.
//! A source that fails to decode is logged and skipped, never surfaced.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::NameRecord;
use crate::error::Result;
use crate::share::{decode_share_state, extract_share_code, SHARE_PARAM};

/// Where the starting NameRecord came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOrigin {
    ShareLink,
    Persisted,
    Seed,
}

impl fmt::Display for StateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateOrigin::ShareLink => write!(f, "share link"),
            StateOrigin::Persisted => write!(f, "persisted store"),
            StateOrigin::Seed => write!(f, "seed names"),
        }
    }
}

/// State recovered from one source.
///
/// `names: None` means the source selects formations only; names are then
/// taken from the next source down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoredState {
    pub home_key: Option<String>,
    pub away_key: Option<String>,
    pub names: Option<NameRecord>,
}

/// A place the starting state can be read from.
pub trait StateSource {
    fn origin(&self) -> StateOrigin;

    /// `Ok(None)` when the source has nothing to offer, `Err` when it has
    /// something that cannot be decoded.
    fn read(&mut self) -> Result<Option<RestoredState>>;
}

/// Outcome of [`resolve_initial_state`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Source that won (formation keys come from here).
    pub origin: StateOrigin,
    /// Source the names came from; differs from `origin` when the winner
    /// carried formations only.
    pub names_origin: StateOrigin,
    pub home_key: Option<String>,
    pub away_key: Option<String>,
    pub names: NameRecord,
}

impl Resolution {
    fn seed() -> Self {
        Self {
            origin: StateOrigin::Seed,
            names_origin: StateOrigin::Seed,
            home_key: None,
            away_key: None,
            names: NameRecord::new(),
        }
    }
}

/// Pick the first source, in priority order, that yields a state.
///
/// When that state carries no names, the remaining sources are consulted for
/// names only. Falls back to an empty record (every slot Unset, seeds show
/// through).
pub fn resolve_initial_state(sources: &mut [&mut dyn StateSource]) -> Resolution {
    let mut resolution: Option<Resolution> = None;

    for source in sources.iter_mut() {
        let origin = source.origin();
        let state = match source.read() {
            Ok(Some(state)) => state,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("Ignoring {}: {}", origin, err);
                continue;
            }
        };

        let current = resolution.get_or_insert_with(|| Resolution {
            origin,
            home_key: state.home_key.clone(),
            away_key: state.away_key.clone(),
            ..Resolution::seed()
        });

        if let Some(names) = state.names {
            log::info!("Restored {} player names from {}", names.len(), origin);
            current.names_origin = origin;
            current.names = names;
            break;
        }
        log::info!("Formations restored from {}, names left to lower sources", origin);
    }

    resolution.unwrap_or_else(Resolution::seed)
}

// ============================================================================
// ShareLinkSource
// ============================================================================

/// Reads a share code out of the current navigation location.
#[derive(Debug, Clone)]
pub struct ShareLinkSource {
    location: Option<String>,
    param: String,
}

impl ShareLinkSource {
    pub fn new(location: Option<&str>) -> Self {
        Self::with_param(location, SHARE_PARAM)
    }

    pub fn with_param(location: Option<&str>, param: &str) -> Self {
        Self { location: location.map(str::to_string), param: param.to_string() }
    }

    pub fn code(&self) -> Option<String> {
        self.location.as_deref().and_then(|loc| extract_share_code(loc, &self.param))
    }
}

impl StateSource for ShareLinkSource {
    fn origin(&self) -> StateOrigin {
        StateOrigin::ShareLink
    }

    fn read(&mut self) -> Result<Option<RestoredState>> {
        let Some(code) = self.code() else {
            return Ok(None);
        };
        let shared = decode_share_state(&code)?;
        Ok(Some(RestoredState {
            home_key: Some(shared.home_key).filter(|key| !key.is_empty()),
            away_key: Some(shared.away_key).filter(|key| !key.is_empty()),
            names: shared.names,
        }))
    }
}
