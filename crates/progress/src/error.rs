//! Tracker errors.

use dontgiveup_core::InputError;
use dontgiveup_storage::StorageError;

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors raised by [`WeightTracker`](crate::WeightTracker).
///
/// The computations themselves never fail; only storage and input
/// validation can.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Underlying store failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Weight rejected before reaching the store
    #[error("invalid weight: {0}")]
    Input(#[from] InputError),
}
