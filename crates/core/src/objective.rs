//! Objective model - a target weight with a derived reached timestamp.

use serde::{Deserialize, Serialize};
use crate::id::ObjectiveId;
use crate::Time;

/// A target weight the user wants to reach.
///
/// `reached_at` is derived from the entry set and is never set by the user:
/// it holds the earliest entry date whose weight is at or below `weight`,
/// or `None` when no such entry exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Unique identifier
    pub id: ObjectiveId,

    /// Target weight
    pub weight: f64,

    /// When created
    pub created_at: Time,

    /// When the target was first matched or passed
    pub reached_at: Option<Time>,
}

impl Objective {
    /// Create a new, not yet evaluated objective created now.
    pub fn new(weight: f64) -> Self {
        Self::with_created_at(weight, chrono::Utc::now())
    }

    /// Create an objective with an explicit creation time.
    pub fn with_created_at(weight: f64, created_at: Time) -> Self {
        Self {
            id: ObjectiveId::new(),
            weight,
            created_at,
            reached_at: None,
        }
    }

    /// Whether some entry has matched or passed the target.
    pub fn is_reached(&self) -> bool {
        self.reached_at.is_some()
    }
}
