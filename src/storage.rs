//! High-score persistence
//!
//! The engine treats storage as an injected synchronous key-value cell.
//! Failures never reach the simulation: a failed read means "no persisted
//! value", a failed write is logged and dropped.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Injected high-score cell. Last write wins; no other contract.
pub trait ScoreStore {
    /// Read the persisted high score, if any
    fn load(&self) -> Option<i32>;
    /// Persist a new high score
    fn store(&mut self, high_score: i32);
}

/// In-memory store for tests and throwaway matches
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<i32>,
}

impl MemoryStore {
    pub fn with_value(high_score: i32) -> Self {
        Self {
            value: Some(high_score),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<i32> {
        self.value
    }

    fn store(&mut self, high_score: i32) {
        self.value = Some(high_score);
    }
}

/// On-disk JSON envelope
#[derive(Debug, Serialize, Deserialize)]
struct SavedScores {
    high_score: i32,
}

/// File-backed store (native builds). The file holds a small JSON document
/// so the format stays inspectable and forward-extensible.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Option<i32> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<SavedScores>(&json) {
            Ok(saved) => {
                log::info!("loaded high score {} from {:?}", saved.high_score, self.path);
                Some(saved.high_score)
            }
            Err(err) => {
                log::warn!("ignoring corrupt score file {:?}: {err}", self.path);
                None
            }
        }
    }

    fn store(&mut self, high_score: i32) {
        let saved = SavedScores { high_score };
        let json = match serde_json::to_string(&saved) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("high score not serializable: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("high score write to {:?} dropped: {err}", self.path);
        }
    }
}
