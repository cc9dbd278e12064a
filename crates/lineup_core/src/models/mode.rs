use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LineupError;

/// Small-sided and full-sized match formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum GameMode {
    #[serde(rename = "6v6")]
    SixASide,
    #[serde(rename = "7v7")]
    SevenASide,
    #[serde(rename = "8v8")]
    EightASide,
    #[serde(rename = "9v9")]
    NineASide,
    #[default]
    #[serde(rename = "11v11")]
    ElevenASide,
}

impl GameMode {
    pub fn all() -> [GameMode; 5] {
        [
            Self::SixASide,
            Self::SevenASide,
            Self::EightASide,
            Self::NineASide,
            Self::ElevenASide,
        ]
    }

    /// Players per team, goalkeeper included.
    pub const fn roster_size(self) -> usize {
        match self {
            Self::SixASide => 6,
            Self::SevenASide => 7,
            Self::EightASide => 8,
            Self::NineASide => 9,
            Self::ElevenASide => 11,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::SixASide => "6v6",
            Self::SevenASide => "7v7",
            Self::EightASide => "8v8",
            Self::NineASide => "9v9",
            Self::ElevenASide => "11v11",
        }
    }

    /// Page that hosts this mode; share links point back at it.
    pub const fn page(self) -> &'static str {
        match self {
            Self::SixASide => "6s.html",
            Self::SevenASide => "7s.html",
            Self::EightASide => "8s.html",
            Self::NineASide => "9s.html",
            Self::ElevenASide => "index.html",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GameMode {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        GameMode::all()
            .into_iter()
            .find(|mode| {
                mode.code() == normalized || mode.roster_size().to_string() == normalized
            })
            .ok_or_else(|| LineupError::UnknownMode(s.to_string()))
    }
}
