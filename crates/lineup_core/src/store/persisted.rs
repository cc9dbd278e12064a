use super::error::StoreError;
use super::migration::migrate_legacy_names;
use super::{KeyValueStore, LEGACY_NAMES_KEY, NAMES_KEY};
use crate::error::Result;
use crate::names::{NameRecord, RestoredState, StateOrigin, StateSource};

/// NameRecord persisted as JSON under a single store key.
#[derive(Debug)]
pub struct PersistedNames<S: KeyValueStore> {
    store: S,
    key: String,
    legacy_key: String,
}

impl<S: KeyValueStore> PersistedNames<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, NAMES_KEY, LEGACY_NAMES_KEY)
    }

    pub fn with_keys(store: S, key: &str, legacy_key: &str) -> Self {
        Self { store, key: key.to_string(), legacy_key: legacy_key.to_string() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored record, migrating the legacy layout on first read.
    pub fn load(&mut self) -> std::result::Result<Option<NameRecord>, StoreError> {
        match self.store.get(&self.key)? {
            Some(json) => Ok(Some(NameRecord::from_json(&json)?)),
            None => migrate_legacy_names(&mut self.store, &self.legacy_key, &self.key),
        }
    }

    pub fn save(&mut self, record: &NameRecord) -> std::result::Result<(), StoreError> {
        let json = record.to_json()?;
        self.store.set(&self.key, &json)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> StateSource for PersistedNames<S> {
    fn origin(&self) -> StateOrigin {
        StateOrigin::Persisted
    }

    fn read(&mut self) -> Result<Option<RestoredState>> {
        Ok(self.load()?.map(|names| RestoredState { names: Some(names), ..Default::default() }))
    }
}
