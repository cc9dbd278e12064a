//! Layout engine
//!
//! Maps a [`FormationDescriptor`] onto pitch coordinates for one side.
//!
//! ## Coordinate system
//! - x: 0 = left touchline, 100 = right touchline
//! - y: 0 = top edge (Away goal), 100 = bottom edge (Home goal)
//!
//! Each side only uses its own half. Lines are placed from the goalkeeper
//! outward; x comes straight from the descriptor.

use serde::{Deserialize, Serialize};

use crate::catalog::validate_formation;
use crate::error::Result;
use crate::models::{FormationDescriptor, GameMode, PlayerSlot, Side};

// ============================================================================
// Constants
// ============================================================================

/// Goalkeeper depth for each side
pub const HOME_GOALKEEPER_Y: f32 = 95.0;
pub const AWAY_GOALKEEPER_Y: f32 = 5.0;

/// Depth of a lone outfield layer
pub const HOME_SINGLE_LAYER_Y: f32 = 70.0;
pub const AWAY_SINGLE_LAYER_Y: f32 = 30.0;

/// Depth of the first outfield layer
pub const HOME_BAND_START: f32 = 85.0;
pub const AWAY_BAND_START: f32 = 15.0;

/// Band depth when there are two outfield layers
pub const WIDE_BAND: f32 = 30.0;
/// Band depth for three or more layers, keeps the front line off halfway
pub const TIGHT_BAND: f32 = 24.0;

/// Lines at least this long push their end players forward
pub const WIDENING_MIN_LINE: usize = 3;
pub const WIDENING_OFFSET: f32 = 2.0;

// ============================================================================
// Types
// ============================================================================

/// Computed position of one slot, in percent of the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPosition {
    pub slot: PlayerSlot,
    /// Line index in the descriptor (0 = goalkeeper line)
    pub line: usize,
    pub x: f32,
    pub y: f32,
}

impl PlayerPosition {
    pub fn number(&self) -> usize {
        self.slot.number()
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Lay out one team.
///
/// Output is ordered by sequential index: goalkeeper first, then line by
/// line, left to right within a line.
///
/// # Errors
/// `InvalidTeamSize` / `InvalidFormation` when the descriptor does not fit
/// the mode. Catalog formations are validated up front, so these indicate a
/// data defect.
pub fn compute_layout(
    descriptor: &FormationDescriptor,
    side: Side,
    mode: GameMode,
) -> Result<Vec<PlayerPosition>> {
    validate_formation(mode, descriptor)?;

    let total_lines = descriptor.lines.len();
    let mut positions = Vec::with_capacity(descriptor.player_count());

    for (line_index, line) in descriptor.lines.iter().enumerate() {
        let base_y = layer_y(line_index, total_lines, side);
        let last = line.len().saturating_sub(1);

        for (within_line, &x) in line.iter().enumerate() {
            let is_wide =
                line.len() >= WIDENING_MIN_LINE && (within_line == 0 || within_line == last);
            let y = if is_wide {
                base_y + WIDENING_OFFSET * side.attack_direction()
            } else {
                base_y
            };

            positions.push(PlayerPosition {
                slot: PlayerSlot::new(side, positions.len()),
                line: line_index,
                x,
                y,
            });
        }
    }

    Ok(positions)
}

/// Base depth of a line before edge widening.
pub fn layer_y(line_index: usize, total_lines: usize, side: Side) -> f32 {
    if line_index == 0 {
        return match side {
            Side::Home => HOME_GOALKEEPER_Y,
            Side::Away => AWAY_GOALKEEPER_Y,
        };
    }

    let outfield_layers = total_lines.saturating_sub(1);
    let outfield_index = (line_index - 1) as f32;

    if outfield_layers <= 1 {
        return match side {
            Side::Home => HOME_SINGLE_LAYER_Y,
            Side::Away => AWAY_SINGLE_LAYER_Y,
        };
    }

    let band = if outfield_layers >= 3 { TIGHT_BAND } else { WIDE_BAND };
    let spacing = band / (outfield_layers - 1) as f32;

    match side {
        Side::Home => HOME_BAND_START - spacing * outfield_index,
        Side::Away => AWAY_BAND_START + spacing * outfield_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FormationCatalog;

    const EPS: f32 = 1e-4;

    fn formation(mode: GameMode, key: &str) -> FormationDescriptor {
        FormationCatalog::builtin().get(mode, key).unwrap().clone()
    }

    #[test]
    fn test_layout_length_matches_roster_for_whole_catalog() {
        let catalog = FormationCatalog::builtin();
        for table in &catalog.modes {
            for descriptor in &table.formations {
                for side in Side::both() {
                    let layout = compute_layout(descriptor, side, table.mode).unwrap();
                    assert_eq!(layout.len(), table.mode.roster_size());
                }
            }
        }
    }

    #[test]
    fn test_goalkeeper_pinned_to_own_edge() {
        let catalog = FormationCatalog::builtin();
        for table in &catalog.modes {
            for descriptor in &table.formations {
                let home = compute_layout(descriptor, Side::Home, table.mode).unwrap();
                let away = compute_layout(descriptor, Side::Away, table.mode).unwrap();
                assert_eq!(home[0].slot, PlayerSlot::home(0));
                assert!((home[0].y - 95.0).abs() < EPS);
                assert!((away[0].y - 5.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_sequential_indices_line_by_line() {
        let descriptor = formation(GameMode::ElevenASide, "4231");
        let layout = compute_layout(&descriptor, Side::Home, GameMode::ElevenASide).unwrap();
        let indices: Vec<usize> = layout.iter().map(|p| p.slot.index).collect();
        assert_eq!(indices, (0..11).collect::<Vec<_>>());
        let lines: Vec<usize> = layout.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![0, 1, 1, 1, 1, 2, 2, 3, 3, 3, 4]);
        // x copied through untouched
        assert_eq!(layout[1].x, 15.0);
        assert_eq!(layout[10].x, 50.0);
    }

    #[test]
    fn test_single_outfield_layer_sits_mid_band() {
        let descriptor = FormationDescriptor::new(
            "5",
            "5",
            vec![vec![50.0], vec![10.0, 30.0, 50.0, 70.0, 90.0]],
        );
        let home = compute_layout(&descriptor, Side::Home, GameMode::SixASide).unwrap();
        let away = compute_layout(&descriptor, Side::Away, GameMode::SixASide).unwrap();
        // middle player is not widened
        assert!((home[3].y - 70.0).abs() < EPS);
        assert!((away[3].y - 30.0).abs() < EPS);
    }

    #[test]
    fn test_two_layers_use_wide_band() {
        assert!((layer_y(1, 3, Side::Home) - 85.0).abs() < EPS);
        assert!((layer_y(2, 3, Side::Home) - 55.0).abs() < EPS);
        assert!((layer_y(1, 3, Side::Away) - 15.0).abs() < EPS);
        assert!((layer_y(2, 3, Side::Away) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_three_or_more_layers_use_tight_band() {
        // 4-2-3-1: four outfield layers
        let home: Vec<f32> = (1..5).map(|i| layer_y(i, 5, Side::Home)).collect();
        assert!((home[0] - 85.0).abs() < EPS);
        assert!((home[3] - 61.0).abs() < EPS);
        let away: Vec<f32> = (1..5).map(|i| layer_y(i, 5, Side::Away)).collect();
        assert!((away[3] - 39.0).abs() < EPS);
        // Home ascends toward midfield, Away descends toward it
        assert!(home.windows(2).all(|w| w[1] < w[0]));
        assert!(away.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_widening_three_player_line() {
        let descriptor = formation(GameMode::ElevenASide, "433");
        for side in Side::both() {
            let layout = compute_layout(&descriptor, side, GameMode::ElevenASide).unwrap();
            let midfield: Vec<&PlayerPosition> = layout.iter().filter(|p| p.line == 2).collect();
            assert_eq!(midfield.len(), 3);

            let middle = midfield[1].y;
            for wide in [midfield[0].y, midfield[2].y] {
                let delta = wide - middle;
                assert!((delta.abs() - 2.0).abs() < EPS);
                // displaced toward the opponent's goal
                assert_eq!(delta.signum(), side.attack_direction());
            }
        }
    }

    #[test]
    fn test_two_player_line_not_widened() {
        let descriptor = formation(GameMode::ElevenASide, "442");
        let layout = compute_layout(&descriptor, Side::Away, GameMode::ElevenASide).unwrap();
        let strikers: Vec<&PlayerPosition> = layout.iter().filter(|p| p.line == 3).collect();
        assert_eq!(strikers[0].y, strikers[1].y);
    }

    #[test]
    fn test_mode_mismatch_is_an_error() {
        let descriptor = formation(GameMode::ElevenASide, "442");
        assert!(compute_layout(&descriptor, Side::Home, GameMode::SevenASide).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_catalog_entry() -> impl Strategy<Value = (GameMode, FormationDescriptor)> {
            let entries: Vec<(GameMode, FormationDescriptor)> = FormationCatalog::builtin()
                .modes
                .iter()
                .flat_map(|t| t.formations.iter().map(move |f| (t.mode, f.clone())))
                .collect();
            proptest::sample::select(entries)
        }

        proptest! {
            /// Property: every player stays inside their own half
            #[test]
            fn prop_players_stay_in_own_half(
                (mode, descriptor) in any_catalog_entry(),
                home in any::<bool>()
            ) {
                let side = if home { Side::Home } else { Side::Away };
                let layout = compute_layout(&descriptor, side, mode).unwrap();
                for p in &layout {
                    match side {
                        Side::Home => {
                            prop_assert!(p.y > 50.0 && p.y <= 95.0);
                        }
                        Side::Away => {
                            prop_assert!(p.y < 50.0 && p.y >= 5.0);
                        }
                    }
                    prop_assert!((0.0..=100.0).contains(&p.x));
                }
            }

            /// Property: the two sides mirror each other around halfway
            #[test]
            fn prop_sides_mirror((mode, descriptor) in any_catalog_entry()) {
                let home = compute_layout(&descriptor, Side::Home, mode).unwrap();
                let away = compute_layout(&descriptor, Side::Away, mode).unwrap();
                for (h, a) in home.iter().zip(&away) {
                    prop_assert!((h.y + a.y - 100.0).abs() < 1e-3);
                    prop_assert_eq!(h.x, a.x);
                }
            }
        }
    }
}
