//! Save-slot persistence.
//!
//! One JSON file per character in a flat directory, keyed by a
//! sanitized form of the character's name. Writes go through a
//! temp-file-then-rename discipline so a failed write can never
//! truncate a previously valid slot.

use crate::character::CharacterRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Save file extension.
const SLOT_EXTENSION: &str = "json";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no save slot named '{0}'")]
    NotFound(String),

    #[error("save slot '{slot}' is corrupt: {reason}")]
    Corrupt { slot: String, reason: String },

    #[error("failed to write save: {0}")]
    Write(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of one save slot, for listing without full loads.
#[derive(Debug, Clone)]
pub struct SlotInfo {
    /// Slot identifier (the sanitized file stem).
    pub slot_id: String,

    /// Character display name.
    pub name: String,

    /// Character level.
    pub level: u32,

    /// Class display string.
    pub class: String,
}

/// Derive a filesystem-safe slot id from a character name.
///
/// Whitespace runs and path separators become single underscores.
/// Distinct names can collide (collisions overwrite, by design of the
/// save-slot contract).
pub fn slot_id_for(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| if std::path::is_separator(c) { '_' } else { c })
        .collect()
}

/// A directory of character save slots.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily, on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the slot file for a given slot id.
    fn slot_path(&self, slot_id: &str) -> PathBuf {
        self.dir.join(format!("{slot_id}.{SLOT_EXTENSION}"))
    }

    /// List all valid save slots, sorted by character name.
    ///
    /// Files that fail to parse or fail record validation are skipped,
    /// never surfaced as slots. A missing directory yields an empty
    /// list.
    pub async fn list_slots(&self) -> Result<Vec<SlotInfo>, StoreError> {
        let mut slots = Vec::new();

        if !self.dir.exists() {
            return Ok(slots);
        }

        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path
                .extension()
                .map(|e| e == SLOT_EXTENSION)
                .unwrap_or(false)
            {
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if let Ok(record) = self.load(stem).await {
                    slots.push(SlotInfo {
                        slot_id: stem.to_string(),
                        name: record.name,
                        level: record.level,
                        class: record.class,
                    });
                }
            }
        }

        slots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(slots)
    }

    /// Load a character record from a slot.
    pub async fn load(&self, slot_id: &str) -> Result<CharacterRecord, StoreError> {
        let path = self.slot_path(slot_id);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(slot_id.to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let record: CharacterRecord =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                slot: slot_id.to_string(),
                reason: e.to_string(),
            })?;

        record.validate().map_err(|e| StoreError::Corrupt {
            slot: slot_id.to_string(),
            reason: e.to_string(),
        })?;

        Ok(record)
    }

    /// Save a character record, returning the slot id written.
    ///
    /// Atomic from the caller's perspective: the new content is staged
    /// in a temp file in the same directory and renamed over the slot,
    /// so either the full new content is visible or the previous
    /// content remains.
    pub async fn save(&self, record: &CharacterRecord) -> Result<String, StoreError> {
        fs::create_dir_all(&self.dir).await.map_err(StoreError::Write)?;

        let slot_id = slot_id_for(&record.name);
        let path = self.slot_path(&slot_id);
        let tmp_path = self.dir.join(format!("{slot_id}.{SLOT_EXTENSION}.tmp"));

        let content = serde_json::to_string_pretty(record).map_err(|e| {
            StoreError::Write(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        fs::write(&tmp_path, content)
            .await
            .map_err(StoreError::Write)?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(StoreError::Write)?;

        Ok(slot_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_slot_id_replaces_whitespace() {
        assert_eq!(slot_id_for("Sir Reginald"), "Sir_Reginald");
        assert_eq!(slot_id_for("  Kael  "), "Kael");
        assert_eq!(slot_id_for("a\tb  c"), "a_b_c");
    }

    #[test]
    fn test_slot_id_replaces_path_separators() {
        let id = slot_id_for("../evil name");
        assert!(!id.contains('/'));
        assert!(!id.contains(' '));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path().join("nested").join("saves"));

        let record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        let slot = store.save(&record).await.expect("Save should succeed");

        assert_eq!(slot, "Kael");
        assert!(store.dir().join("Kael.json").exists());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        record.level = 3;
        record
            .extra
            .insert("gold".to_string(), serde_json::json!(17));

        let slot = store.save(&record).await.expect("Save should succeed");
        let loaded = store.load(&slot).await.expect("Load should succeed");

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_load_missing_slot() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        let err = store.load("Nobody").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_corrupt_slot() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        std::fs::write(temp_dir.path().join("Broken.json"), "{not json")
            .expect("Write should succeed");

        let err = store.load("Broken").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        // Parses fine, but violates the HP invariant.
        let json = serde_json::json!({
            "name": "Glass", "class": "Mage", "race": "Human",
            "level": 1, "current_hp": 99, "max_hp": 10, "xp": 0,
        });
        std::fs::write(
            temp_dir.path().join("Glass.json"),
            serde_json::to_string(&json).unwrap(),
        )
        .expect("Write should succeed");

        let err = store.load("Glass").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_slots() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        store
            .save(&CharacterRecord::new("Beta", "Bard", "Gnome", 8))
            .await
            .expect("Save should succeed");
        store
            .save(&CharacterRecord::new("Alpha", "Monk", "Human", 9))
            .await
            .expect("Save should succeed");
        std::fs::write(temp_dir.path().join("Junk.json"), "garbage")
            .expect("Write should succeed");
        std::fs::write(temp_dir.path().join("notes.txt"), "not a slot")
            .expect("Write should succeed");

        let slots = store.list_slots().await.expect("List should succeed");

        let names: Vec<_> = slots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path().join("never_created"));

        let slots = store.list_slots().await.expect("List should succeed");
        assert!(slots.is_empty());
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_same_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        let mut record = CharacterRecord::new("Kael", "Rogue", "Elf", 10);
        store.save(&record).await.expect("Save should succeed");

        record.level = 5;
        store.save(&record).await.expect("Save should succeed");

        let slots = store.list_slots().await.expect("List should succeed");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].level, 5);
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SaveStore::new(temp_dir.path());

        store
            .save(&CharacterRecord::new("Kael", "Rogue", "Elf", 10))
            .await
            .expect("Save should succeed");

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
