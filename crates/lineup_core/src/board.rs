//! # Board
//!
//! Composition root for one page: the selected mode, one formation per side,
//! and the name synchronizer. Everything a renderer, exporter or share path
//! needs is read from here.
//!
//! ```rust
//! use lineup_core::prelude::*;
//!
//! let catalog = FormationCatalog::builtin();
//! let config = LineupConfig::default();
//! let mut board =
//!     Board::open(catalog, &config, GameMode::ElevenASide, MemoryStore::new(), None).unwrap();
//!
//! board.rename(PlayerSlot::home(9), "kane").unwrap();
//! let markers = board.markers(Side::Home).unwrap();
//! assert_eq!(markers[9].name, "KANE");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::catalog::FormationCatalog;
use crate::config::LineupConfig;
use crate::error::{LineupError, Result};
use crate::handoff::ExportRequest;
use crate::layout::{compute_layout, PlayerPosition};
use crate::models::{FormationDescriptor, GameMode, PlayerSlot, Side};
use crate::names::{NameSynchronizer, ShareLinkSource, StateOrigin};
use crate::share::{build_share_url, encode_share_state, ShareState};
use crate::store::{KeyValueStore, PersistedNames};

/// What the renderer draws for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMarker {
    pub slot: PlayerSlot,
    pub number: usize,
    pub x: f32,
    pub y: f32,
    pub name: String,
}

#[derive(Debug)]
pub struct Board<'c, S: KeyValueStore> {
    catalog: &'c FormationCatalog,
    mode: GameMode,
    home_key: String,
    away_key: String,
    origin: StateOrigin,
    share_base_url: String,
    share_param: String,
    names: NameSynchronizer<S>,
}

impl<'c, S: KeyValueStore> Board<'c, S> {
    /// Open a board, restoring state from `location` (share link) or `store`.
    ///
    /// Formation keys from a share link are applied when the mode knows them;
    /// anything else falls back to the mode default.
    pub fn open(
        catalog: &'c FormationCatalog,
        config: &LineupConfig,
        mode: GameMode,
        store: S,
        location: Option<&str>,
    ) -> Result<Self> {
        let persisted =
            PersistedNames::with_keys(store, &config.storage_key, &config.legacy_storage_key);
        let mut names = NameSynchronizer::new(persisted, config.seeds())
            .with_away_placeholder(config.away_placeholder.clone());

        let mut link =
            location.map(|loc| ShareLinkSource::with_param(Some(loc), &config.share_param));
        let resolution = names.initialize(link.as_mut());

        let default_key = catalog.default_key(mode)?;
        let pick = |restored: Option<String>, side: Side| -> String {
            match restored {
                Some(key) if catalog.contains(mode, &key) => key,
                Some(key) => {
                    log::warn!(
                        "Formation '{}' unknown for {} ({}), using '{}'",
                        key,
                        mode,
                        side,
                        default_key
                    );
                    default_key.to_string()
                }
                None => default_key.to_string(),
            }
        };
        let home_key = pick(resolution.home_key, Side::Home);
        let away_key = pick(resolution.away_key, Side::Away);

        Ok(Self {
            catalog,
            mode,
            home_key,
            away_key,
            origin: resolution.origin,
            share_base_url: config.share_base_url.clone(),
            share_param: config.share_param.clone(),
            names,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Where the starting names came from.
    pub fn origin(&self) -> StateOrigin {
        self.origin
    }

    pub fn formation_key(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_key,
            Side::Away => &self.away_key,
        }
    }

    pub fn formation(&self, side: Side) -> Result<&'c FormationDescriptor> {
        self.catalog.get(self.mode, self.formation_key(side))
    }

    /// Switch one side's formation. Names are keyed by slot, so edits carry
    /// over unchanged.
    pub fn select_formation(&mut self, side: Side, key: &str) -> Result<()> {
        self.catalog.get(self.mode, key)?;
        match side {
            Side::Home => self.home_key = key.to_string(),
            Side::Away => self.away_key = key.to_string(),
        }
        Ok(())
    }

    pub fn name(&self, slot: PlayerSlot) -> Cow<'_, str> {
        self.names.get_name(slot)
    }

    /// Rename a player. `Ok(false)` when the name is blank and was ignored.
    pub fn rename(&mut self, slot: PlayerSlot, name: &str) -> Result<bool> {
        if slot.index >= self.mode.roster_size() {
            return Err(LineupError::SlotOutOfRange { slot, mode: self.mode });
        }
        Ok(self.names.set_name(slot, name))
    }

    pub fn names(&self) -> &NameSynchronizer<S> {
        &self.names
    }

    pub fn into_names(self) -> NameSynchronizer<S> {
        self.names
    }

    pub fn layout(&self, side: Side) -> Result<Vec<PlayerPosition>> {
        compute_layout(self.formation(side)?, side, self.mode)
    }

    /// Layout joined with display names, in slot order.
    pub fn markers(&self, side: Side) -> Result<Vec<PlayerMarker>> {
        Ok(self
            .layout(side)?
            .into_iter()
            .map(|position| PlayerMarker {
                slot: position.slot,
                number: position.number(),
                x: position.x,
                y: position.y,
                name: self.names.get_name(position.slot).into_owned(),
            })
            .collect())
    }

    pub fn share_state(&self) -> ShareState {
        ShareState::new(self.home_key.as_str(), self.away_key.as_str(), self.names.record().clone())
    }

    pub fn share_code(&self) -> Result<String> {
        Ok(encode_share_state(&self.share_state())?)
    }

    pub fn share_url(&self) -> Result<String> {
        let code = self.share_code()?;
        Ok(build_share_url(&self.share_base_url, self.mode, &self.share_param, &code))
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::for_mode(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameRecord;
    use crate::store::{MemoryStore, NAMES_KEY};

    fn open(
        mode: GameMode,
        store: MemoryStore,
        location: Option<&str>,
    ) -> Board<'static, MemoryStore> {
        Board::open(FormationCatalog::builtin(), &LineupConfig::default(), mode, store, location)
            .unwrap()
    }

    #[test]
    fn test_fresh_board_uses_defaults_and_seeds() {
        let board = open(GameMode::ElevenASide, MemoryStore::new(), None);

        assert_eq!(board.origin(), StateOrigin::Seed);
        assert_eq!(board.formation_key(Side::Home), "442");
        assert_eq!(board.formation_key(Side::Away), "442");
        assert_eq!(board.name(PlayerSlot::home(0)), "MBAPPE");
        assert_eq!(board.name(PlayerSlot::away(0)), "");
        assert_eq!(board.markers(Side::Home).unwrap().len(), 11);
    }

    #[test]
    fn test_edit_survives_formation_change() {
        let mut board = open(GameMode::ElevenASide, MemoryStore::new(), None);
        board.select_formation(Side::Home, "442").unwrap();
        assert!(board.rename(PlayerSlot::home(3), "alpha").unwrap());

        board.select_formation(Side::Home, "433").unwrap();

        assert_eq!(board.formation_key(Side::Home), "433");
        assert_eq!(board.name(PlayerSlot::home(3)), "ALPHA");
        let markers = board.markers(Side::Home).unwrap();
        assert_eq!(markers[3].name, "ALPHA");
        assert_eq!(markers[3].number, 4);
    }

    #[test]
    fn test_unknown_formation_rejected() {
        let mut board = open(GameMode::SevenASide, MemoryStore::new(), None);
        let err = board.select_formation(Side::Home, "322").unwrap_err();
        assert!(matches!(err, LineupError::UnknownFormation { .. }));
        assert_eq!(board.formation_key(Side::Home), "321");
    }

    #[test]
    fn test_rename_out_of_range() {
        let mut board = open(GameMode::SixASide, MemoryStore::new(), None);
        let err = board.rename(PlayerSlot::home(6), "X").unwrap_err();
        assert!(matches!(err, LineupError::SlotOutOfRange { .. }));
        assert!(!board.rename(PlayerSlot::home(5), "   ").unwrap());
    }

    #[test]
    fn test_share_link_restores_other_board() {
        let mut source = open(GameMode::NineASide, MemoryStore::new(), None);
        source.select_formation(Side::Away, "323").unwrap();
        source.rename(PlayerSlot::away(2), "bravo").unwrap();
        let url = source.share_url().unwrap();
        assert!(url.starts_with("https://lineup.example/9s.html?d="));

        let persisted = MemoryStore::new().with_entry(NAMES_KEY, r#"{"home_0":"OLD"}"#);
        let board = open(GameMode::NineASide, persisted, Some(&url));

        assert_eq!(board.origin(), StateOrigin::ShareLink);
        assert_eq!(board.formation_key(Side::Away), "323");
        assert_eq!(board.name(PlayerSlot::away(2)), "BRAVO");
        // Link replaces, rather than merges with, persisted names
        assert_eq!(board.name(PlayerSlot::home(0)), "MBAPPE");

        let stored = board.into_names().into_persisted().into_store();
        let record = NameRecord::from_json(&stored.get(NAMES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(record.get(PlayerSlot::away(2)), Some("BRAVO"));
        assert!(!record.contains(PlayerSlot::home(0)));
    }

    #[test]
    fn test_foreign_formation_key_falls_back() {
        let names = NameRecord::new();
        let code = encode_share_state(&ShareState::new("321", "999", names)).unwrap();
        let board = open(GameMode::ElevenASide, MemoryStore::new(), Some(&code));

        assert_eq!(board.origin(), StateOrigin::ShareLink);
        assert_eq!(board.formation_key(Side::Home), "442");
        assert_eq!(board.formation_key(Side::Away), "442");
    }

    #[test]
    fn test_formations_only_link_keeps_stored_names() {
        let code = encode_share_state(&ShareState::formations_only("433", "352")).unwrap();
        let persisted = MemoryStore::new().with_entry(NAMES_KEY, r#"{"home_0":"KEEPME"}"#);
        let board = open(GameMode::ElevenASide, persisted, Some(&code));

        assert_eq!(board.origin(), StateOrigin::ShareLink);
        assert_eq!(board.formation_key(Side::Home), "433");
        assert_eq!(board.formation_key(Side::Away), "352");
        assert_eq!(board.name(PlayerSlot::home(0)), "KEEPME");

        let stored = board.into_names().into_persisted().into_store();
        assert_eq!(stored.get(NAMES_KEY).unwrap().as_deref(), Some(r#"{"home_0":"KEEPME"}"#));
    }

    #[test]
    fn test_export_request() {
        let board = open(GameMode::EightASide, MemoryStore::new(), None);
        assert_eq!(board.export_request().filename, "formation-8v8.png");
    }
}
