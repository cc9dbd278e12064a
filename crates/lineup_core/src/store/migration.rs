use serde::Deserialize;

use super::error::StoreError;
use super::KeyValueStore;
use crate::names::{normalize_name, NameRecord};

/// Older layout: one positional array per side.
#[derive(Debug, Deserialize)]
struct LegacyGlobalNames {
    #[serde(default)]
    home: Vec<Option<String>>,
    #[serde(default)]
    away: Vec<Option<String>>,
}

/// Move names stored under the legacy per-side array key to the keyed record.
///
/// The converted record is written under `key` and the legacy entry removed,
/// so the migration runs once. Unreadable legacy data is left in place and
/// ignored.
pub fn migrate_legacy_names<S: KeyValueStore>(
    store: &mut S,
    legacy_key: &str,
    key: &str,
) -> Result<Option<NameRecord>, StoreError> {
    let Some(raw) = store.get(legacy_key)? else {
        return Ok(None);
    };

    let legacy: LegacyGlobalNames = match serde_json::from_str(&raw) {
        Ok(legacy) => legacy,
        Err(err) => {
            log::warn!("Ignoring unreadable legacy names under '{}': {}", legacy_key, err);
            return Ok(None);
        }
    };

    let upper = |names: Vec<Option<String>>| -> Vec<Option<String>> {
        names.into_iter().map(|name| name.map(|n| normalize_name(&n))).collect()
    };
    let record = NameRecord::from_side_arrays(&upper(legacy.home), &upper(legacy.away));

    store.set(key, &record.to_json()?)?;
    store.remove(legacy_key)?;

    log::info!("Migrated {} legacy player names from '{}' to '{}'", record.len(), legacy_key, key);
    Ok(Some(record))
}
