//! Read-only access to exported tracker data.
//!
//! The tracker database is exported as one JSONL file per entity type:
//! - `players.jsonl`, `decks.jsonl`, `groups.jsonl`
//! - `games.jsonl`, each game carrying its seats
//!
//! [`Snapshot`] loads them and answers the participation queries the stats
//! service needs.

mod jsonl;
mod snapshot;

pub use jsonl::*;
pub use snapshot::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the JSONL file holding one entity type.
    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
