//! Save slot storage.
//!
//! A store holds exactly one named slot. `save` overwrites it (last write
//! wins) and `load` returns `None` when nothing has been saved yet. There
//! is no schema versioning: the slot is the serialized `GameState`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::PersistenceError;
use crate::core::{GameConfig, GameState};

/// Encoding used for the save slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    /// `{"stars": .., "collection": {..}}`, compatible with the browser save.
    #[default]
    Json,
    /// Compact binary encoding.
    Bincode,
}

impl SaveFormat {
    /// File extension for slot files.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            SaveFormat::Json => "json",
            SaveFormat::Bincode => "bin",
        }
    }

    /// Serialize a state.
    ///
    /// A NaN or infinite balance is refused: JSON would write it as `null`
    /// and the slot could never be read back.
    pub fn encode(self, state: &GameState) -> Result<Vec<u8>, PersistenceError> {
        if !state.stars.is_finite() {
            return Err(PersistenceError::NonFiniteBalance(state.stars));
        }
        Ok(match self {
            SaveFormat::Json => serde_json::to_vec(state)?,
            SaveFormat::Bincode => bincode::serialize(state)?,
        })
    }

    /// Deserialize a state.
    pub fn decode(self, bytes: &[u8]) -> Result<GameState, PersistenceError> {
        Ok(match self {
            SaveFormat::Json => serde_json::from_slice(bytes)?,
            SaveFormat::Bincode => bincode::deserialize(bytes)?,
        })
    }
}

/// A single-slot save store.
pub trait SaveStore {
    /// Overwrite the slot with `state`.
    fn save(&mut self, state: &GameState) -> Result<(), PersistenceError>;

    /// Read the slot. `Ok(None)` if it has never been written.
    fn load(&self) -> Result<Option<GameState>, PersistenceError>;
}

impl<S: SaveStore + ?Sized> SaveStore for &mut S {
    fn save(&mut self, state: &GameState) -> Result<(), PersistenceError> {
        (**self).save(state)
    }

    fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        (**self).load()
    }
}

/// In-memory slot holding the encoded bytes.
///
/// Encoding on every save keeps the behavior identical to the file store,
/// including encode failures.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    format: SaveFormat,
    slot: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_format(format: SaveFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Raw slot contents.
    #[must_use]
    pub fn raw(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistenceError> {
        self.slot = Some(self.format.encode(state)?);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        self.slot
            .as_deref()
            .map(|bytes| self.format.decode(bytes))
            .transpose()
    }
}

/// Slot stored as `{dir}/{slot}.{json|bin}`.
///
/// Writes go to a sibling temp file which is then renamed over the slot,
/// so a crash mid-write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    format: SaveFormat,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, slot: &str, format: SaveFormat) -> Self {
        let path = dir
            .as_ref()
            .join(format!("{slot}.{}", format.extension()));
        Self { path, format }
    }

    /// Store for the config's slot name and save format.
    #[must_use]
    pub fn for_config(dir: impl AsRef<Path>, config: &GameConfig) -> Self {
        Self::new(dir, &config.save_slot, config.save_format)
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the slot file. Missing files are not an error.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

impl SaveStore for FileStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistenceError> {
        let bytes = self.format.encode(state)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "game saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state = self.format.decode(&bytes)?;
        info!(path = %self.path.display(), "game loaded");
        Ok(Some(state))
    }
}
