use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Side;
use crate::error::LineupError;

/// Stable identity of one player position: side plus sequential index.
///
/// Index 0 is always the goalkeeper; indices run line by line, left to right.
/// The text form ("home_3") only exists at serialization boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PlayerSlot {
    pub side: Side,
    pub index: usize,
}

impl PlayerSlot {
    pub const fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    pub const fn home(index: usize) -> Self {
        Self::new(Side::Home, index)
    }

    pub const fn away(index: usize) -> Self {
        Self::new(Side::Away, index)
    }

    /// Shirt number shown on the marker.
    pub const fn number(&self) -> usize {
        self.index + 1
    }

    pub const fn is_goalkeeper(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.side.key_prefix(), self.index)
    }
}

impl FromStr for PlayerSlot {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, index) =
            s.rsplit_once('_').ok_or_else(|| LineupError::InvalidSlot(s.to_string()))?;
        let side = Side::from_prefix(prefix).ok_or_else(|| LineupError::InvalidSlot(s.to_string()))?;
        let index = index.parse::<usize>().map_err(|_| LineupError::InvalidSlot(s.to_string()))?;
        Ok(Self::new(side, index))
    }
}

impl From<PlayerSlot> for String {
    fn from(slot: PlayerSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for PlayerSlot {
    type Error = LineupError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_text_form() {
        assert_eq!(PlayerSlot::home(0).to_string(), "home_0");
        assert_eq!(PlayerSlot::away(10).to_string(), "away_10");
        assert_eq!("away_4".parse::<PlayerSlot>().unwrap(), PlayerSlot::away(4));
    }

    #[test]
    fn test_legacy_team_prefix_parses() {
        assert_eq!("my-team_2".parse::<PlayerSlot>().unwrap(), PlayerSlot::home(2));
        assert_eq!("opp-team_7".parse::<PlayerSlot>().unwrap(), PlayerSlot::away(7));
    }

    #[test]
    fn test_invalid_slots_rejected() {
        for bad in ["home", "home_", "home_-1", "bench_1", "home_x", ""] {
            assert!(bad.parse::<PlayerSlot>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_slot_order_home_first() {
        assert!(PlayerSlot::home(10) < PlayerSlot::away(0));
        assert!(PlayerSlot::home(1) < PlayerSlot::home(2));
    }
}
