//! Storage trait abstraction.

use async_trait::async_trait;
use dontgiveup_core::{EntryId, Objective, ObjectiveId, ThemePreference, WeightEntry};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record exists but cannot be decoded
    #[error("corrupt record {}: {}", .path.display(), .source)]
    Corrupt {
        /// File holding the record
        path: std::path::PathBuf,
        /// Decoding failure
        source: serde_json::Error,
    },
}

/// Storage abstraction for weight entries, objectives and the theme
/// preference.
///
/// Each call either succeeds or fails as a whole: a listing never skips a
/// record it cannot read. Deleting ids that are not stored is not an error.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Entry operations ===

    /// Save an entry (create or replace).
    async fn save_entry(&mut self, entry: &WeightEntry) -> Result<()>;

    /// Load an entry by ID.
    async fn load_entry(&self, id: EntryId) -> Result<Option<WeightEntry>>;

    /// List all entries, oldest first.
    async fn list_entries(&self) -> Result<Vec<WeightEntry>>;

    /// Delete a batch of entries, returning how many were removed.
    async fn delete_entries(&mut self, ids: &[EntryId]) -> Result<usize>;

    // === Objective operations ===

    /// Save an objective (create or update).
    async fn save_objective(&mut self, objective: &Objective) -> Result<()>;

    /// Load an objective by ID.
    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>>;

    /// List all objectives, highest target weight first.
    async fn list_objectives(&self) -> Result<Vec<Objective>>;

    /// Delete a batch of objectives, returning how many were removed.
    async fn delete_objectives(&mut self, ids: &[ObjectiveId]) -> Result<usize>;

    // === Preferences ===

    /// Load the theme preference, or the default when none is stored.
    async fn load_theme(&self) -> Result<ThemePreference>;

    /// Store the theme preference.
    async fn save_theme(&mut self, theme: &ThemePreference) -> Result<()>;
}

/// Order entries by date, then by id so equal dates stay in creation order.
pub(crate) fn sort_entries(entries: &mut [WeightEntry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}

/// Order objectives by descending target, then oldest first.
pub(crate) fn sort_objectives(objectives: &mut [Objective]) {
    objectives.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}
