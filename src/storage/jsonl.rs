//! JSONL (JSON Lines) reading.
//!
//! Each line is a valid JSON object representing one entity.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};

/// Entity types stored as JSONL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Deck,
    Game,
    Group,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Deck => "decks.jsonl",
            EntityType::Game => "games.jsonl",
            EntityType::Group => "groups.jsonl",
        }
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    /// Read all entities from the file.
    ///
    /// A missing file reads as empty. Lines that fail to parse are logged and
    /// skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            debug!("No file at {:?}, treating as empty", self.path);
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", i + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;
    use tempfile::TempDir;

    #[test]
    fn test_read_all() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.jsonl");
        std::fs::write(
            &path,
            "{\"id\":1,\"name\":\"Alice\"}\n\n{\"id\":2,\"name\":\"Bob\",\"retired\":true}\n",
        )
        .unwrap();

        let reader = JsonlReader::<Player>::new(path);

        let players = reader.read_all().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Alice");
        assert!(players[1].retired);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let reader = JsonlReader::<Player>::new(dir.path().join("missing.jsonl"));

        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_skips_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.jsonl");
        std::fs::write(&path, "{\"id\":1,\"name\":\"Alice\"}\nnot json\n{\"name\":\"no id\"}\n")
            .unwrap();

        let players = JsonlReader::<Player>::new(path).read_all().unwrap();
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn test_for_entity() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::new(dir.path().to_path_buf());
        std::fs::write(
            config.entity_path(EntityType::Player),
            "{\"id\":3,\"name\":\"Carol\"}\n",
        )
        .unwrap();

        let players = JsonlReader::<Player>::for_entity(&config, EntityType::Player)
            .read_all()
            .unwrap();
        assert_eq!(players[0].name, "Carol");
    }

    #[test]
    fn test_entity_filenames() {
        assert_eq!(EntityType::Deck.filename(), "decks.jsonl");
        assert_eq!(EntityType::Group.filename(), "groups.jsonl");
    }
}
