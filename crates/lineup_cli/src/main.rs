//! Lineup CLI
//!
//! Browse the formation catalog, print layouts, and manage a board's player
//! names and share links from the terminal.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lineup_core::{Board, FileStore, FormationCatalog, GameMode, Side};
use lineup_cli::WriterTarget;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Formation boards, player names and share links", long_about = None)]
struct Cli {
    /// Formation catalog YAML (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Board configuration YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted player names
    #[arg(long, global = true, default_value = ".lineup")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List formations per game mode (* marks the default)
    Formations {
        /// Only this mode (e.g. "7v7")
        #[arg(long)]
        mode: Option<GameMode>,
    },

    /// Check every formation against its roster size
    Validate,

    /// Print computed coordinates for one formation
    Layout {
        #[arg(long, default_value = "11v11")]
        mode: GameMode,

        /// Formation key (defaults to the mode's default)
        #[arg(long)]
        key: Option<String>,

        /// "home" or "away"
        #[arg(long, default_value = "home", value_parser = parse_side)]
        side: Side,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show a board with names, restored from a link or the store
    Show {
        #[arg(long, default_value = "11v11")]
        mode: GameMode,

        /// Share URL or bare code to restore from
        #[arg(long)]
        link: Option<String>,

        #[arg(long)]
        home: Option<String>,

        #[arg(long)]
        away: Option<String>,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Rename players, e.g. `lineup rename home_9=KANE away_0=RICE`
    Rename {
        #[arg(long, default_value = "11v11")]
        mode: GameMode,

        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// Build a share URL for the current board
    Share {
        #[arg(long, default_value = "11v11")]
        mode: GameMode,

        #[arg(long)]
        home: Option<String>,

        #[arg(long)]
        away: Option<String>,

        /// Write the URL to this file (falls back to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Decode a share URL or code
    Decode {
        input: String,
    },
}

fn parse_side(raw: &str) -> Result<Side, String> {
    Side::from_prefix(&raw.to_ascii_lowercase()).ok_or_else(|| format!("unknown side '{raw}'"))
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_writer(io::stderr).try_init();

    let cli = Cli::parse();

    let owned_catalog = cli.catalog.as_deref().map(lineup_cli::load_catalog).transpose()?;
    let catalog = match owned_catalog.as_ref() {
        Some(catalog) => catalog,
        None => FormationCatalog::builtin(),
    };
    let config = lineup_cli::load_config(cli.config.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Formations { mode } => lineup_cli::list_formations(&mut stdout, catalog, mode)?,

        Commands::Validate => lineup_cli::validate_catalog(&mut stdout, catalog)?,

        Commands::Layout { mode, key, side, json } => {
            lineup_cli::print_layout(&mut stdout, catalog, mode, key.as_deref(), side, json)?
        }

        Commands::Show { mode, link, home, away, json } => {
            let store = FileStore::new(&cli.store);
            let mut board = Board::open(catalog, &config, mode, store, link.as_deref())?;
            select(&mut board, home.as_deref(), away.as_deref())?;
            lineup_cli::show_board(&mut stdout, &board, json)?;
        }

        Commands::Rename { mode, assignments } => {
            let store = FileStore::new(&cli.store);
            let mut board = Board::open(catalog, &config, mode, store, None)?;
            let applied = lineup_cli::rename_players(&mut stdout, &mut board, &assignments)?;
            tracing::info!(applied, store = %cli.store.display(), "Player names saved");
        }

        Commands::Share { mode, home, away, out } => {
            let store = FileStore::new(&cli.store);
            let mut board = Board::open(catalog, &config, mode, store, None)?;
            select(&mut board, home.as_deref(), away.as_deref())?;

            let mut fallback = WriterTarget { writer: &mut stdout };
            let receipt = lineup_cli::share_board(&board, out, &mut fallback)?;
            tracing::info!(via = %receipt.target, "Share link delivered");
        }

        Commands::Decode { input } => {
            lineup_cli::decode_link(&mut stdout, &input, &config.share_param)?
        }
    }

    Ok(())
}

fn select(board: &mut Board<'_, FileStore>, home: Option<&str>, away: Option<&str>) -> Result<()> {
    if let Some(key) = home {
        board.select_formation(Side::Home, key)?;
    }
    if let Some(key) = away {
        board.select_formation(Side::Away, key)?;
    }
    Ok(())
}
