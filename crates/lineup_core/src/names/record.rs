use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerSlot, Side};

/// Explicitly edited player names, keyed by slot.
///
/// A slot without an entry is Unset and shows its seed or placeholder.
/// Blank names are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameRecord(BTreeMap<PlayerSlot, String>);

impl NameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: PlayerSlot) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    pub fn contains(&self, slot: PlayerSlot) -> bool {
        self.0.contains_key(&slot)
    }

    /// Store a name; blank names are rejected and leave the record untouched.
    pub fn insert(&mut self, slot: PlayerSlot, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        self.0.insert(slot, name);
        true
    }

    pub fn remove(&mut self, slot: PlayerSlot) -> Option<String> {
        self.0.remove(&slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, &str)> {
        self.0.iter().map(|(slot, name)| (*slot, name.as_str()))
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = (PlayerSlot, &str)> {
        self.iter().filter(move |(slot, _)| slot.side == side)
    }

    /// Build from per-side name arrays, zipping array position into the slot
    /// index. Missing and blank entries are skipped.
    pub fn from_side_arrays(home: &[Option<String>], away: &[Option<String>]) -> Self {
        let mut record = Self::new();
        for (side, names) in [(Side::Home, home), (Side::Away, away)] {
            for (index, name) in names.iter().enumerate() {
                if let Some(name) = name {
                    record.insert(PlayerSlot::new(side, index), name.clone());
                }
            }
        }
        record
    }

    /// Build from a loosely typed map, as found in stored or shared JSON.
    ///
    /// Keys that are not slots and values that are not non-blank strings are
    /// dropped with a warning rather than failing the whole record.
    pub fn from_loose_map(map: BTreeMap<String, serde_json::Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in map {
            let slot = match key.parse::<PlayerSlot>() {
                Ok(slot) => slot,
                Err(_) => {
                    log::warn!("Dropping name entry with unknown slot key '{}'", key);
                    continue;
                }
            };
            match value {
                serde_json::Value::String(name) => {
                    record.insert(slot, name);
                }
                serde_json::Value::Null => {}
                other => log::warn!("Dropping non-text name for {}: {}", slot, other),
            }
        }
        record
    }

    /// Parse stored JSON. Only a non-object document is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_loose_map(map))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromIterator<(PlayerSlot, String)> for NameRecord {
    fn from_iter<T: IntoIterator<Item = (PlayerSlot, String)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (slot, name) in iter {
            record.insert(slot, name);
        }
        record
    }
}
