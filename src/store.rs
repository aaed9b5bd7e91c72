//! String-keyed persistence.
//!
//! `KeyValueStore` is the flat key/value layer (one serialized blob per key).
//! `FileStore` keeps all entries in a single JSON file written with a
//! temporary file and an atomic rename to avoid partial writes; `MemoryStore`
//! backs tests. On top of that sits the per-user document layer: one
//! `StorageData` blob per identity under `impacts_<email>`, defaulted when
//! absent or unreadable, shallow-merged at the top-level collection keys on
//! every write.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Identity, StorageData, StoragePatch};

const STORAGE_PREFIX: &str = "impacts_";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend, used in tests and as a scratch store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed backend: the entry map lives in one JSON file and is rewritten
/// in full after every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Opens (or prepares to create) the store at `path`. A file that cannot
    /// be parsed is treated as empty rather than refusing to start.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = if path.exists() {
            let mut file = File::open(&path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("store file {} is unreadable, starting empty: {e}", path.display());
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        let content = serde_json::to_string_pretty(&self.entries)?;
        f.write_all(content.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// Key under which a user's document is stored. Deterministic per email, so
/// distinct identities never collide.
pub fn user_data_key(email: &str) -> String {
    format!("{STORAGE_PREFIX}{email}")
}

/// Reads the user's document, or a freshly defaulted one when nothing is
/// stored yet. A blob that fails to parse is logged and replaced by the
/// default document; corruption never propagates to the caller.
pub fn read_user_data(kv: &impl KeyValueStore, user: &Identity) -> StorageData {
    let key = user_data_key(&user.email);
    match kv.get(&key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("stored document under '{key}' is corrupt, using defaults: {e}");
                StorageData::default()
            }
        },
        None => StorageData::default(),
    }
}

/// Merges `patch` over the user's current document and persists the result
/// as a single blob. Collections absent from the patch are preserved.
pub fn write_user_data(
    kv: &mut impl KeyValueStore,
    user: &Identity,
    patch: StoragePatch,
) -> Result<(), StoreError> {
    let mut data = read_user_data(kv, user);
    if let Some(activities) = patch.activities {
        data.activities = activities;
    }
    if let Some(milestones) = patch.milestones {
        data.milestones = milestones;
    }
    if let Some(assessment) = patch.readiness_assessment {
        data.readiness_assessment = assessment;
    }
    if let Some(plans) = patch.action_plans {
        data.action_plans = plans;
    }

    let key = user_data_key(&user.email);
    kv.set(&key, &serde_json::to_string(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_milestones;
    use crate::types::{Activity, ActivityCategory};
    use chrono::NaiveDate;

    fn user(email: &str) -> Identity {
        Identity {
            name: "Test".to_string(),
            email: email.to_string(),
            role: "admin".to_string(),
        }
    }

    fn activity(id: u32, title: &str) -> Activity {
        Activity {
            id,
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            title: title.to_string(),
            category: ActivityCategory::GeneralAdmin,
            hours: 2.0,
            simulation_type: None,
            simulation_participants: None,
            feedback_submitted: None,
            notes: None,
        }
    }

    #[test]
    fn key_derivation_is_deterministic_and_distinct() {
        assert_eq!(user_data_key("a@b.com"), "impacts_a@b.com");
        assert_ne!(user_data_key("a@b.com"), user_data_key("c@d.com"));
    }

    #[test]
    fn read_without_document_returns_defaults() {
        let kv = MemoryStore::new();
        let data = read_user_data(&kv, &user("a@b.com"));
        assert!(data.activities.is_empty());
        assert_eq!(data.milestones, default_milestones());
    }

    #[test]
    fn corrupt_document_falls_back_to_defaults() {
        let mut kv = MemoryStore::new();
        kv.set("impacts_a@b.com", "{not json").unwrap();
        let data = read_user_data(&kv, &user("a@b.com"));
        assert_eq!(data, StorageData::default());
    }

    #[test]
    fn shallow_merge_preserves_untouched_collections() {
        let mut kv = MemoryStore::new();
        let me = user("a@b.com");

        write_user_data(
            &mut kv,
            &me,
            StoragePatch::activities(vec![activity(1, "Kickoff meeting")]),
        )
        .unwrap();

        let mut milestones = default_milestones();
        milestones[0].completed = true;
        write_user_data(&mut kv, &me, StoragePatch::milestones(milestones.clone())).unwrap();

        let data = read_user_data(&kv, &me);
        assert_eq!(data.milestones, milestones);
        assert_eq!(data.activities, vec![activity(1, "Kickoff meeting")]);
    }

    #[test]
    fn documents_are_partitioned_by_email() {
        let mut kv = MemoryStore::new();
        write_user_data(
            &mut kv,
            &user("a@b.com"),
            StoragePatch::activities(vec![activity(1, "Only mine")]),
        )
        .unwrap();

        let other = read_user_data(&kv, &user("c@d.com"));
        assert!(other.activities.is_empty());
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut kv = MemoryStore::new();
        let me = user("a@b.com");
        let mut expected = StorageData::default();
        expected.activities = vec![activity(1, "Round trip")];
        expected.milestones[3].completed = true;

        write_user_data(
            &mut kv,
            &me,
            StoragePatch {
                activities: Some(expected.activities.clone()),
                milestones: Some(expected.milestones.clone()),
                readiness_assessment: Some(expected.readiness_assessment.clone()),
                action_plans: Some(expected.action_plans.clone()),
            },
        )
        .unwrap();

        assert_eq!(read_user_data(&kv, &me), expected);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        {
            let mut kv = FileStore::open(path.clone()).unwrap();
            kv.set("impacts_a@b.com", "{\"activities\":[]}").unwrap();
        }

        let kv = FileStore::open(path).unwrap();
        assert_eq!(
            kv.get("impacts_a@b.com").as_deref(),
            Some("{\"activities\":[]}")
        );
    }

    #[test]
    fn file_store_survives_a_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json at all").unwrap();

        let kv = FileStore::open(path).unwrap();
        assert!(kv.get("impacts_a@b.com").is_none());
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut kv = FileStore::open(dir.path().join("data.json")).unwrap();
        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();
        kv.remove("k").unwrap();
        assert!(kv.get("k").is_none());
    }
}
