use std::borrow::Cow;

use super::record::NameRecord;
use super::seed::SeedNames;
use super::source::{resolve_initial_state, Resolution, ShareLinkSource, StateOrigin, StateSource};
use crate::models::{PlayerSlot, Side};
use crate::store::{KeyValueStore, PersistedNames};

/// Owns the canonical NameRecord and keeps the persisted copy in step.
///
/// Every slot is either Unset (seed or placeholder shows) or Edited. Edited
/// entries survive formation changes; only an inbound share link or another
/// explicit edit replaces them.
#[derive(Debug)]
pub struct NameSynchronizer<S: KeyValueStore> {
    record: NameRecord,
    seeds: SeedNames,
    away_placeholder: String,
    persisted: PersistedNames<S>,
}

impl<S: KeyValueStore> NameSynchronizer<S> {
    pub fn new(persisted: PersistedNames<S>, seeds: SeedNames) -> Self {
        Self { record: NameRecord::new(), seeds, away_placeholder: String::new(), persisted }
    }

    pub fn with_away_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.away_placeholder = placeholder.into();
        self
    }

    /// Resolve the starting record: share link, then persisted store, then
    /// seeds. Names carried by a share link are written straight to the store
    /// so they become the new baseline; a link without names leaves the store
    /// untouched.
    pub fn initialize(&mut self, inbound: Option<&mut ShareLinkSource>) -> Resolution {
        let resolution = {
            let mut sources: Vec<&mut dyn StateSource> = Vec::with_capacity(2);
            if let Some(link) = inbound {
                sources.push(link);
            }
            sources.push(&mut self.persisted);
            resolve_initial_state(&mut sources)
        };

        self.record = resolution.names.clone();

        if resolution.names_origin == StateOrigin::ShareLink {
            self.persist();
        }

        resolution
    }

    /// Display name for a slot.
    pub fn get_name(&self, slot: PlayerSlot) -> Cow<'_, str> {
        if let Some(name) = self.record.get(slot) {
            return Cow::Borrowed(name);
        }
        match slot.side {
            Side::Home => self.seeds.name_for(slot.index),
            Side::Away => Cow::Borrowed(self.away_placeholder.as_str()),
        }
    }

    /// Store an edited name, upper-cased, and persist the record.
    ///
    /// Returns false when the name is blank; the slot keeps its current value.
    pub fn set_name(&mut self, slot: PlayerSlot, name: &str) -> bool {
        let normalized = normalize_name(name);
        if !self.record.insert(slot, normalized) {
            return false;
        }
        self.persist();
        true
    }

    pub fn is_edited(&self, slot: PlayerSlot) -> bool {
        self.record.contains(slot)
    }

    pub fn record(&self) -> &NameRecord {
        &self.record
    }

    pub fn persisted(&self) -> &PersistedNames<S> {
        &self.persisted
    }

    pub fn into_persisted(self) -> PersistedNames<S> {
        self.persisted
    }

    fn persist(&mut self) {
        // In-memory state stays authoritative when the store is unavailable
        if let Err(err) = self.persisted.save(&self.record) {
            log::warn!("Failed to persist player names: {}", err);
        }
    }
}

/// Trim and upper-case a display name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}
