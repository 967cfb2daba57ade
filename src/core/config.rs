//! Game configuration.
//!
//! Holds the tunables of a game: the starting balance,
//! the debug star grant, the shop's pack list, where catalog documents are,
//! and the save slot. Configs load from JSON; missing fields take defaults.
//!
//! ```
//! use star_packs::core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "starting_stars": 250 }"#).unwrap();
//! assert_eq!(config.starting_stars, 250.0);
//! assert_eq!(config.save_slot, "yugioh_collection_game");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::PackId;
use crate::persistence::SaveFormat;

/// Stars a new game starts with.
pub const DEFAULT_STARTING_STARS: f64 = 100.0;

/// Stars granted by the debug "add stars" action.
pub const DEFAULT_BONUS_STARS: f64 = 100.0;

/// Save slot shared with the browser version of the game.
pub const DEFAULT_SAVE_SLOT: &str = "yugioh_collection_game";

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balance of a fresh (or reset) game.
    pub starting_stars: f64,

    /// Stars added by `Economy::add_stars`.
    pub bonus_stars: f64,

    /// Packs offered in the shop, in display order. Also the set that
    /// defines the catalog size for progress.
    pub shop_packs: Vec<PackId>,

    /// Root directory for JSON catalog documents.
    pub data_root: PathBuf,

    /// Save slot name.
    pub save_slot: String,

    /// On-disk encoding of the save slot.
    pub save_format: SaveFormat,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_stars: DEFAULT_STARTING_STARS,
            bonus_stars: DEFAULT_BONUS_STARS,
            shop_packs: vec![PackId::new("pack_00001")],
            data_root: PathBuf::from("data"),
            save_slot: DEFAULT_SAVE_SLOT.to_string(),
            save_format: SaveFormat::Json,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check amounts and the slot name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("starting_stars", self.starting_stars),
            ("bonus_stars", self.bonus_stars),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAmount { field, value });
            }
        }
        if self.save_slot.trim().is_empty() {
            return Err(ConfigError::EmptySaveSlot);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_starting_stars(mut self, stars: f64) -> Self {
        self.starting_stars = stars;
        self
    }

    #[must_use]
    pub fn with_bonus_stars(mut self, stars: f64) -> Self {
        self.bonus_stars = stars;
        self
    }

    /// Set the shop's pack list.
    #[must_use]
    pub fn with_shop_packs<I, P>(mut self, packs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PackId>,
    {
        self.shop_packs = packs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = root.into();
        self
    }

    #[must_use]
    pub fn with_save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    #[must_use]
    pub fn with_save_format(mut self, format: SaveFormat) -> Self {
        self.save_format = format;
        self
    }

    /// Fix the RNG seed for reproducible draws.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
