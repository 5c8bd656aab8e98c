//! Display strings for the presentation layer.

use dontgiveup_core::{DisplayConfig, Objective, Time};
use serde::Serialize;

use crate::calculator::Progress;
use crate::stats::WeightStats;

/// Shown in place of a value that cannot be computed yet.
pub const PLACEHOLDER: &str = "—";

/// One labelled line of the statistics screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    /// Label
    pub title: &'static str,
    /// Formatted value
    pub value: String,
}

/// Formats weights, rates and progress using a [`DisplayConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    config: DisplayConfig,
}

impl Formatter {
    /// Create a formatter for the given settings.
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// `"180.0 lb"`, or the placeholder when there is no value.
    pub fn weight(&self, weight: Option<f64>) -> String {
        match weight {
            Some(w) => format!("{:.1} {}", w, self.config.unit.suffix()),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// `"5.00 lb/week"`
    pub fn weekly_rate(&self, rate: f64) -> String {
        format!("{:.2} {}/week", rate, self.config.unit.suffix())
    }

    /// `"67%"`, or the placeholder when no progress is displayable.
    pub fn progress(&self, progress: Option<&Progress>) -> String {
        match progress {
            Some(p) => format!("{}%", p.rounded()),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Medium-style date, e.g. `"Sep 3, 2025"`.
    pub fn date(&self, date: Time) -> String {
        date.format("%b %-d, %Y").to_string()
    }

    /// Reached status line for an objective.
    pub fn objective_status(&self, objective: &Objective) -> String {
        match objective.reached_at {
            Some(at) => format!("Reached: {}", self.date(at)),
            None => "Still not reached".to_string(),
        }
    }

    /// One-sentence description of an objective for screen readers.
    pub fn objective_summary(&self, objective: &Objective) -> String {
        let head = format!(
            "Objective: {:.1} {}, added on {}",
            objective.weight,
            self.config.unit.name(),
            self.date(objective.created_at)
        );
        match objective.reached_at {
            Some(at) => format!("{}, reached on {}", head, self.date(at)),
            None => format!("{}, still not reached", head),
        }
    }

    /// Statistics rows in display order.
    pub fn stats_rows(&self, stats: &WeightStats) -> Vec<StatRow> {
        vec![
            StatRow {
                title: "Maximum",
                value: self.weight(stats.max),
            },
            StatRow {
                title: "Minimum",
                value: self.weight(stats.min),
            },
            StatRow {
                title: "Total Loss",
                value: self.weight(Some(stats.total_loss)),
            },
            StatRow {
                title: "Avg Loss / week",
                value: self.weekly_rate(stats.avg_weekly_loss),
            },
            StatRow {
                title: "Max Loss Between Weeks",
                value: self.weight(Some(stats.max_weekly_loss)),
            },
        ]
    }
}
