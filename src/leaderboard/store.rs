//! Leaderboard store implementations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{decode_entries, encode_entries, LeaderboardEntry, LeaderboardStore, LEADERBOARD_FILE};
use crate::error::StoreError;
use crate::utils::persistence;

/// Leaderboard persisted as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.canton-run/canton_halloween_leaderboard.json`.
    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(persistence::save_path(LEADERBOARD_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no leaderboard at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("could not read leaderboard {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        decode_entries(&text).unwrap_or_else(|e| {
            log::warn!(
                "ignoring corrupt leaderboard {}: {}",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode_entries(entries)?)?;
        Ok(())
    }
}

/// Leaderboard kept as serialized text in memory.
///
/// Holds the same text a file would, so corrupt data behaves exactly like
/// a corrupt file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    pub fn with_entries(entries: &[LeaderboardEntry]) -> Self {
        Self {
            raw: encode_entries(entries).ok(),
            saves: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> Vec<LeaderboardEntry> {
        match &self.raw {
            Some(raw) => decode_entries(raw).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        self.raw = Some(encode_entries(entries)?);
        self.saves += 1;
        Ok(())
    }
}
