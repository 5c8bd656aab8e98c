//! JSON file storage implementation.
//!
//! Stores one JSON file per record under the storage root and keeps small
//! per-record meta markers (version + updated_at). The theme preference is a
//! single `theme.json` file.

use std::path::{Path, PathBuf};

use dontgiveup_core::{EntryId, Objective, ObjectiveId, ThemePreference, WeightEntry};
use tokio::fs;
use tracing::debug;

use crate::trait_::{sort_entries, sort_objectives};
use super::{Result, Storage, StorageError};

const ENTRIES: &str = "entries";
const OBJECTIVES: &str = "objectives";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the record and meta
    /// directories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join(ENTRIES)).await?;
        fs::create_dir_all(root.join(OBJECTIVES)).await?;
        fs::create_dir_all(root.join("meta").join(ENTRIES)).await?;
        fs::create_dir_all(root.join("meta").join(OBJECTIVES)).await?;

        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, kind: &str, id: &str) -> PathBuf {
        self.root.join(kind).join(format!("{}.json", id))
    }

    fn meta_path(&self, kind: &str, id: &str) -> PathBuf {
        self.root.join("meta").join(kind).join(format!("{}.meta.json", id))
    }

    fn theme_path(&self) -> PathBuf {
        self.root.join("theme.json")
    }

    async fn write_record<T: serde::Serialize>(
        &self,
        kind: &str,
        id: &str,
        value: &T,
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.record_path(kind, id), json.as_bytes()).await?;
        let version = self.bump_version(kind, id).await?;
        debug!(kind, id, version, "record written");
        Ok(())
    }

    async fn remove_record(&self, kind: &str, id: &str) -> Result<bool> {
        let removed = remove_if_exists(&self.record_path(kind, id)).await?;
        remove_if_exists(&self.meta_path(kind, id)).await?;
        if removed {
            debug!(kind, id, "record removed");
        }
        Ok(removed)
    }

    /// Read and increment per-record version, return new version.
    async fn bump_version(&self, kind: &str, id: &str) -> Result<u64> {
        let path = self.meta_path(kind, id);
        let mut version = 0u64;
        if let Ok(s) = fs::read_to_string(&path).await {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&s) {
                if let Some(v) = json.get("version").and_then(|v| v.as_u64()) {
                    version = v;
                }
            }
        }
        version += 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(&path, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_entry(&mut self, entry: &WeightEntry) -> Result<()> {
        self.write_record(ENTRIES, &entry.id.to_string(), entry).await
    }

    async fn load_entry(&self, id: EntryId) -> Result<Option<WeightEntry>> {
        read_json(&self.record_path(ENTRIES, &id.to_string())).await
    }

    async fn list_entries(&self) -> Result<Vec<WeightEntry>> {
        let mut entries: Vec<WeightEntry> = list_dir(&self.root.join(ENTRIES)).await?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    async fn delete_entries(&mut self, ids: &[EntryId]) -> Result<usize> {
        let mut removed = 0;
        for id in ids {
            if self.remove_record(ENTRIES, &id.to_string()).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn save_objective(&mut self, objective: &Objective) -> Result<()> {
        self.write_record(OBJECTIVES, &objective.id.to_string(), objective).await
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        read_json(&self.record_path(OBJECTIVES, &id.to_string())).await
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives: Vec<Objective> = list_dir(&self.root.join(OBJECTIVES)).await?;
        sort_objectives(&mut objectives);
        Ok(objectives)
    }

    async fn delete_objectives(&mut self, ids: &[ObjectiveId]) -> Result<usize> {
        let mut removed = 0;
        for id in ids {
            if self.remove_record(OBJECTIVES, &id.to_string()).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn load_theme(&self) -> Result<ThemePreference> {
        Ok(read_json(&self.theme_path()).await?.unwrap_or_default())
    }

    async fn save_theme(&mut self, theme: &ThemePreference) -> Result<()> {
        let json = serde_json::to_string_pretty(theme)?;
        fs::write(self.theme_path(), json.as_bytes()).await?;
        Ok(())
    }
}

async fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json).map_err(|source| StorageError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Some(item) = read_json(&entry.path()).await? {
            items.push(item);
        }
    }
    Ok(items)
}
