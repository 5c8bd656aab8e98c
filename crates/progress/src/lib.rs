//! Progress Tracking
//!
//! Objective evaluation, progress percentage, summary statistics, and the
//! service that keeps them consistent with the stores.

#![warn(missing_docs)]

pub mod evaluator;
pub mod calculator;
pub mod stats;
pub mod chart;
pub mod format;
pub mod tracker;
mod error;

pub use evaluator::ObjectiveEvaluator;
pub use calculator::{GoalDirection, Progress, ProgressCalculator, DEFAULT_EPSILON};
pub use stats::{StatsAggregator, WeeklyAverage, WeightStats};
pub use chart::{chart_series, ChartDomain, ChartPoint};
pub use format::{Formatter, StatRow, PLACEHOLDER};
pub use tracker::{ProgressTracker, ProgressSnapshot, WeightTracker};
pub use error::{Result, TrackerError};
