//! In-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use dontgiveup_core::{EntryId, Objective, ObjectiveId, ThemePreference, WeightEntry};

use crate::trait_::{sort_entries, sort_objectives};
use super::{Result, Storage};

/// Storage that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<EntryId, WeightEntry>,
    objectives: HashMap<ObjectiveId, Objective>,
    theme: Option<ThemePreference>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save_entry(&mut self, entry: &WeightEntry) -> Result<()> {
        self.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn load_entry(&self, id: EntryId) -> Result<Option<WeightEntry>> {
        Ok(self.entries.get(&id).cloned())
    }

    async fn list_entries(&self) -> Result<Vec<WeightEntry>> {
        let mut entries: Vec<WeightEntry> = self.entries.values().cloned().collect();
        sort_entries(&mut entries);
        Ok(entries)
    }

    async fn delete_entries(&mut self, ids: &[EntryId]) -> Result<usize> {
        Ok(ids.iter().filter(|id| self.entries.remove(*id).is_some()).count())
    }

    async fn save_objective(&mut self, objective: &Objective) -> Result<()> {
        self.objectives.insert(objective.id, objective.clone());
        Ok(())
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        Ok(self.objectives.get(&id).cloned())
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives: Vec<Objective> = self.objectives.values().cloned().collect();
        sort_objectives(&mut objectives);
        Ok(objectives)
    }

    async fn delete_objectives(&mut self, ids: &[ObjectiveId]) -> Result<usize> {
        Ok(ids.iter().filter(|id| self.objectives.remove(*id).is_some()).count())
    }

    async fn load_theme(&self) -> Result<ThemePreference> {
        Ok(self.theme.unwrap_or_default())
    }

    async fn save_theme(&mut self, theme: &ThemePreference) -> Result<()> {
        self.theme = Some(*theme);
        Ok(())
    }
}
