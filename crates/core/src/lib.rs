//! Dont Give Up core data models.
//!
//! This crate defines the plain records exchanged between the entry and
//! objective stores and the progress/statistics computations.

#![warn(missing_docs)]

// Core identities
mod id;

// Measurements and targets
mod entry;
mod objective;

// Presentation settings
mod config;

// Input boundary
mod input;

// Re-exports
pub use id::*;

pub use entry::{chronological, WeightEntry};
pub use objective::Objective;
pub use config::{DisplayConfig, ThemePreference, WeightUnit};
pub use input::{parse_weight, InputError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
