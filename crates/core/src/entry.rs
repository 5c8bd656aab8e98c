//! Weight entry model - a single dated measurement.

use serde::{Deserialize, Serialize};
use crate::id::EntryId;
use crate::Time;

/// A weight measurement logged by the user.
///
/// Entries are immutable once created; the only mutation is deletion.
/// Several entries may share the same date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Unique identifier
    pub id: EntryId,

    /// When the measurement was taken
    pub date: Time,

    /// Measured weight
    pub weight: f64,
}

impl WeightEntry {
    /// Create a new entry.
    pub fn new(date: Time, weight: f64) -> Self {
        Self {
            id: EntryId::new(),
            date,
            weight,
        }
    }
}

/// Borrow `entries` in ascending date order.
///
/// The sort is stable: entries sharing a date keep their input order.
pub fn chronological(entries: &[WeightEntry]) -> Vec<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}
