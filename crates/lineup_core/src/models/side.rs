use std::fmt;

use serde::{Deserialize, Serialize};

/// Team side on the pitch.
///
/// Home defends the bottom edge (y = 100), Away defends the top edge (y = 0).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Home,
    Away,
}

impl Side {
    pub const fn both() -> [Side; 2] {
        [Side::Home, Side::Away]
    }

    /// Prefix used in slot keys ("home_0").
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }

    /// Prefix written by older share links ("my-team_0").
    pub const fn legacy_prefix(self) -> &'static str {
        match self {
            Side::Home => "my-team",
            Side::Away => "opp-team",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Side> {
        Side::both()
            .into_iter()
            .find(|side| side.key_prefix() == prefix || side.legacy_prefix() == prefix)
    }

    /// Sign of a step toward the opponent's goal on the y axis.
    pub const fn attack_direction(self) -> f32 {
        match self {
            Side::Home => -1.0,
            Side::Away => 1.0,
        }
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Side::from_prefix("home"), Some(Side::Home));
        assert_eq!(Side::from_prefix("opp-team"), Some(Side::Away));
        assert_eq!(Side::from_prefix("bench"), None);
    }

    #[test]
    fn test_attack_direction_points_at_opponent_half() {
        // Home sits at the bottom, so attacking means decreasing y
        assert!(Side::Home.attack_direction() < 0.0);
        assert!(Side::Away.attack_direction() > 0.0);
        assert_eq!(Side::Home.opponent(), Side::Away);
    }
}
