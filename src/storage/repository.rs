use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::game::GameSnapshot;

/// A snapshot plus its bookkeeping, as written to `<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub id: String,
    /// Unix seconds.
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
    pub snapshot: GameSnapshot,
}

impl SavedGame {
    /// Time of the most recent write.
    pub fn last_saved(&self) -> u64 {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Stores one JSON file per saved game in a directory.
pub struct JsonGameRepository {
    dir: PathBuf,
}

impl JsonGameRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonGameRepository { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a new game and return its freshly assigned id.
    pub fn save(&self, snapshot: &GameSnapshot) -> Result<String, StorageError> {
        let mut id = new_id();
        while self.exists(&id) {
            id = new_id();
        }
        let saved = SavedGame {
            id: id.clone(),
            created_at: now(),
            updated_at: None,
            snapshot: snapshot.clone(),
        };
        self.write(&saved)?;
        info!(id = %id, "saved game");
        Ok(id)
    }

    /// Overwrite an existing save. Returns `false` if `id` does not exist.
    pub fn update(&self, id: &str, snapshot: &GameSnapshot) -> Result<bool, StorageError> {
        let Some(existing) = self.load(id)? else {
            return Ok(false);
        };
        let saved = SavedGame {
            updated_at: Some(now()),
            snapshot: snapshot.clone(),
            ..existing
        };
        self.write(&saved)?;
        info!(id = %id, "updated saved game");
        Ok(true)
    }

    pub fn load(&self, id: &str) -> Result<Option<SavedGame>, StorageError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        read_saved(&path).map(Some)
    }

    /// All saved games, most recently written first. Files that fail to
    /// parse are skipped with a warning.
    pub fn list(&self) -> Result<Vec<SavedGame>, StorageError> {
        let mut games = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_saved(&path) {
                Ok(saved) => games.push(saved),
                Err(e) => warn!("skipping unreadable save: {e}"),
            }
        }
        games.sort_by(|a, b| b.last_saved().cmp(&a.last_saved()).then_with(|| a.id.cmp(&b.id)));
        Ok(games)
    }

    /// Remove a save. Returns `false` if `id` does not exist.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        info!(id = %id, "deleted saved game");
        Ok(true)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Write via a temporary file and rename so a crash never leaves a
    /// half-written save.
    fn write(&self, saved: &SavedGame) -> Result<(), StorageError> {
        let final_path = self.path_for(&saved.id);
        let tmp_path = self.dir.join(format!("{}.json.tmp", saved.id));
        let json = serde_json::to_string_pretty(saved)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &final_path)?;
        debug!(path = %final_path.display(), "wrote save file");
        Ok(())
    }
}

fn read_saved(path: &Path) -> Result<SavedGame, StorageError> {
    let json = fs::read_to_string(path).map_err(|e| StorageError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| StorageError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn new_id() -> String {
    format!("{:016x}", rand::rng().random::<u64>())
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
