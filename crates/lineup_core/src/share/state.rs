use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ShareError;
use crate::names::NameRecord;

/// Snapshot carried by a share link.
///
/// `names` is `None` when the link only carries formations; an empty record
/// means the link explicitly clears every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareState {
    pub home_key: String,
    pub away_key: String,
    pub names: Option<NameRecord>,
}

impl ShareState {
    pub fn new(home_key: impl Into<String>, away_key: impl Into<String>, names: NameRecord) -> Self {
        Self { home_key: home_key.into(), away_key: away_key.into(), names: Some(names) }
    }

    /// A link that selects formations and leaves names alone.
    pub fn formations_only(home_key: impl Into<String>, away_key: impl Into<String>) -> Self {
        Self { home_key: home_key.into(), away_key: away_key.into(), names: None }
    }

    pub(crate) fn to_wire(&self) -> KeyedShapeRef<'_> {
        KeyedShapeRef { h: &self.home_key, a: &self.away_key, n: self.names.as_ref() }
    }
}

/// The only shape ever written: `{"h": .., "a": .., "n": {..}}`.
#[derive(Debug, Serialize)]
pub(crate) struct KeyedShapeRef<'a> {
    h: &'a str,
    a: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<&'a NameRecord>,
}

/// Current shape; missing formation keys read as empty.
#[derive(Debug, Deserialize)]
struct KeyedShape {
    #[serde(default)]
    h: Option<String>,
    #[serde(default)]
    a: Option<String>,
    #[serde(default)]
    n: Option<BTreeMap<String, serde_json::Value>>,
}

/// Legacy `[homeKey, awayKey, homeNames, awayNames]`.
#[derive(Debug, Deserialize)]
struct PositionalShape(String, String, Vec<serde_json::Value>, Vec<serde_json::Value>);

impl From<KeyedShape> for ShareState {
    fn from(shape: KeyedShape) -> Self {
        ShareState {
            home_key: shape.h.unwrap_or_default(),
            away_key: shape.a.unwrap_or_default(),
            names: shape.n.map(NameRecord::from_loose_map),
        }
    }
}

impl From<PositionalShape> for ShareState {
    fn from(PositionalShape(home_key, away_key, home, away): PositionalShape) -> Self {
        let names = NameRecord::from_side_arrays(&side_entries(home), &side_entries(away));
        ShareState { home_key, away_key, names: Some(names) }
    }
}

/// Keep string entries in position; anything else leaves its slot Unset.
fn side_entries(values: Vec<serde_json::Value>) -> Vec<Option<String>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            serde_json::Value::String(name) => Some(name),
            serde_json::Value::Null => None,
            other => {
                log::warn!("Dropping non-string name at position {}: {}", index, other);
                None
            }
        })
        .collect()
}

/// Parse decompressed share JSON in either supported shape.
pub(crate) fn parse_share_json(bytes: &[u8]) -> Result<ShareState, ShareError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let parsed = match value {
        serde_json::Value::Object(_) => {
            serde_json::from_value::<KeyedShape>(value).map(ShareState::from)
        }
        serde_json::Value::Array(_) => {
            serde_json::from_value::<PositionalShape>(value).map(ShareState::from)
        }
        _ => return Err(ShareError::UnsupportedShape),
    };
    parsed.map_err(|_| ShareError::UnsupportedShape)
}
