//! Lineup CLI library
//!
//! Command implementations behind the `lineup` binary. Each command writes to
//! the supplied writer so it can be driven from tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use lineup_core::handoff::{deliver_with_fallback, DeliveryError, DeliveryReceipt, ShareTarget};
use lineup_core::share::{decode_share_state, extract_share_code};
use lineup_core::{
    compute_layout, Board, FormationCatalog, GameMode, KeyValueStore, LineupConfig, PlayerSlot,
    Side,
};

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<FormationCatalog> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let catalog = FormationCatalog::from_yaml_str(&yaml)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
    catalog.validate().context("Catalog failed validation")?;
    Ok(catalog)
}

pub fn load_config(path: Option<&Path>) -> Result<LineupConfig> {
    match path {
        Some(path) => LineupConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(LineupConfig::default()),
    }
}

// ============================================================================
// Catalog commands
// ============================================================================

pub fn list_formations(
    out: &mut impl Write,
    catalog: &FormationCatalog,
    mode: Option<GameMode>,
) -> Result<()> {
    let modes: Vec<GameMode> = match mode {
        Some(mode) => vec![mode],
        None => GameMode::all().to_vec(),
    };

    for mode in modes {
        let table = catalog.mode(mode)?;
        writeln!(out, "{} ({} players)", mode, mode.roster_size())?;
        for formation in &table.formations {
            let marker = if formation.key == table.default { "*" } else { " " };
            writeln!(out, " {} {:<6} {}", marker, formation.key, formation.label)?;
        }
    }
    Ok(())
}

pub fn validate_catalog(out: &mut impl Write, catalog: &FormationCatalog) -> Result<()> {
    catalog.validate().context("Catalog failed validation")?;
    let total: usize = catalog.modes.iter().map(|m| m.formations.len()).sum();
    writeln!(
        out,
        "✅ Catalog v{} OK: {} modes, {} formations",
        catalog.version,
        catalog.modes.len(),
        total
    )?;
    Ok(())
}

pub fn print_layout(
    out: &mut impl Write,
    catalog: &FormationCatalog,
    mode: GameMode,
    key: Option<&str>,
    side: Side,
    json: bool,
) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => catalog.default_key(mode)?,
    };
    let formation = catalog.get(mode, key)?;
    let positions = compute_layout(formation, side, mode)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&positions)?)?;
        return Ok(());
    }

    writeln!(out, "{} {} ({})", mode, formation.label, side)?;
    for position in &positions {
        writeln!(
            out,
            "  #{:<2} line {}  x={:>5.1}  y={:>5.1}",
            position.number(),
            position.line,
            position.x,
            position.y
        )?;
    }
    Ok(())
}

// ============================================================================
// Board commands
// ============================================================================

#[derive(Debug, Serialize)]
struct BoardView<'a> {
    mode: GameMode,
    origin: String,
    home: &'a str,
    away: &'a str,
    markers: Vec<lineup_core::PlayerMarker>,
}

pub fn show_board<S: KeyValueStore>(
    out: &mut impl Write,
    board: &Board<'_, S>,
    json: bool,
) -> Result<()> {
    if json {
        let mut markers = board.markers(Side::Home)?;
        markers.extend(board.markers(Side::Away)?);
        let view = BoardView {
            mode: board.mode(),
            origin: board.origin().to_string(),
            home: board.formation_key(Side::Home),
            away: board.formation_key(Side::Away),
            markers,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    writeln!(out, "{} (names from {})", board.mode(), board.origin())?;
    for side in Side::both() {
        let formation = board.formation(side)?;
        writeln!(out, "{}: {}", side, formation.label)?;
        for marker in board.markers(side)? {
            writeln!(
                out,
                "  #{:<2} {:<14} ({:.1}, {:.1})",
                marker.number, marker.name, marker.x, marker.y
            )?;
        }
    }
    Ok(())
}

/// Parse `home_3=KANE` style assignments.
pub fn parse_assignment(raw: &str) -> Result<(PlayerSlot, String)> {
    let Some((slot, name)) = raw.split_once('=') else {
        bail!("Expected <slot>=<name>, got '{}'", raw);
    };
    let slot: PlayerSlot = slot.trim().parse().with_context(|| format!("Bad slot in '{}'", raw))?;
    Ok((slot, name.to_string()))
}

/// Apply renames; returns how many were stored.
pub fn rename_players<S: KeyValueStore>(
    out: &mut impl Write,
    board: &mut Board<'_, S>,
    assignments: &[String],
) -> Result<usize> {
    let mut applied = 0;
    for raw in assignments {
        let (slot, name) = parse_assignment(raw)?;
        if board.rename(slot, &name)? {
            writeln!(out, "{} -> {}", slot, board.name(slot))?;
            applied += 1;
        } else {
            writeln!(out, "{} unchanged (blank name)", slot)?;
        }
    }
    Ok(applied)
}

// ============================================================================
// Share delivery
// ============================================================================

/// Writes the link to a file.
#[derive(Debug, Clone)]
pub struct FileTarget {
    pub path: PathBuf,
}

impl ShareTarget for FileTarget {
    fn name(&self) -> &str {
        "file"
    }

    fn deliver(&mut self, url: &str) -> std::result::Result<(), DeliveryError> {
        fs::write(&self.path, format!("{url}\n")).map_err(|err| DeliveryError::Rejected {
            target: format!("file {}", self.path.display()),
            reason: err.to_string(),
        })
    }
}

/// Prints the link for manual copying. Always available.
#[derive(Debug, Default)]
pub struct WriterTarget<W: Write> {
    pub writer: W,
}

impl<W: Write> ShareTarget for WriterTarget<W> {
    fn name(&self) -> &str {
        "stdout"
    }

    fn deliver(&mut self, url: &str) -> std::result::Result<(), DeliveryError> {
        writeln!(self.writer, "{url}").map_err(|err| DeliveryError::Rejected {
            target: "stdout".to_string(),
            reason: err.to_string(),
        })
    }
}

/// Build the board's share URL and hand it to the file target (if any), then
/// fall back to `fallback`.
pub fn share_board<S: KeyValueStore, W: Write>(
    board: &Board<'_, S>,
    file: Option<PathBuf>,
    fallback: &mut WriterTarget<W>,
) -> Result<DeliveryReceipt> {
    let url = board.share_url()?;

    let mut file_target = file.map(|path| FileTarget { path });
    let mut targets: Vec<&mut dyn ShareTarget> = Vec::with_capacity(2);
    if let Some(target) = file_target.as_mut() {
        targets.push(target);
    }
    targets.push(fallback);

    let receipt = deliver_with_fallback(&mut targets, &url)?;
    if receipt.used_fallback() {
        tracing::warn!(via = %receipt.target, "Share link delivered via fallback");
    }
    Ok(receipt)
}

/// Decode a share code or URL and print the carried state as JSON.
pub fn decode_link(out: &mut impl Write, input: &str, param: &str) -> Result<()> {
    let code = extract_share_code(input, param).context("No share code found in input")?;
    let state = decode_share_state(&code).context("Failed to decode share code")?;

    let view = serde_json::json!({
        "home": state.home_key,
        "away": state.away_key,
        "names": state.names,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    Ok(())
}
