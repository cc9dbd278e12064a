use serde::{Deserialize, Serialize};

/// One rank of players at the same nominal depth, as x percentages (0-100)
/// from left to right.
pub type Line = Vec<f32>;

/// Static layout template for one formation.
///
/// Lines run from the goalkeeper outward; the first line holds exactly one
/// player. Horizontal positions are authored per game mode, so the layout
/// engine never computes x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationDescriptor {
    /// Catalog key, e.g. "442"
    pub key: String,
    /// Display label, e.g. "4-4-2"
    pub label: String,
    pub lines: Vec<Line>,
}

impl FormationDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, lines: Vec<Line>) -> Self {
        Self { key: key.into(), label: label.into(), lines }
    }

    pub fn player_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn line_counts(&self) -> Vec<usize> {
        self.lines.iter().map(Vec::len).collect()
    }

    /// Lines after the goalkeeper line.
    pub fn outfield_layers(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Formation code built from the outfield line counts ("4-2-3-1").
    pub fn shape_code(&self) -> String {
        self.line_counts()
            .iter()
            .skip(1)
            .map(|count| count.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}
