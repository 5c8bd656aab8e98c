//! Summary statistics over the entry series.
//!
//! Everything is recomputed from the full series on each call; nothing is
//! cached between queries.

use std::collections::BTreeMap;

use chrono::Datelike;
use dontgiveup_core::{chronological, WeightEntry};
use serde::{Deserialize, Serialize};

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 3600.0;

/// Aggregate metrics for a weight series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightStats {
    /// Lowest weight, `None` for an empty series
    pub min: Option<f64>,

    /// Highest weight, `None` for an empty series
    pub max: Option<f64>,

    /// First minus last weight, never negative
    pub total_loss: f64,

    /// Total loss per week between the first and last entry
    pub avg_weekly_loss: f64,

    /// Largest drop between adjacent weekly averages, never negative
    pub max_weekly_loss: f64,
}

/// Average weight over one ISO calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverage {
    /// ISO week-numbering year
    pub year: i32,

    /// ISO week number (1..=53)
    pub week: u32,

    /// Mean weight of the entries in the week
    pub average: f64,

    /// Number of entries in the week
    pub count: usize,
}

/// Computes [`WeightStats`] from a series of entries.
pub struct StatsAggregator;

impl StatsAggregator {
    /// Compute every metric for `entries`.
    pub fn compute(&self, entries: &[WeightEntry]) -> WeightStats {
        WeightStats {
            min: entries.iter().map(|e| e.weight).reduce(f64::min),
            max: entries.iter().map(|e| e.weight).reduce(f64::max),
            total_loss: self.total_loss(entries),
            avg_weekly_loss: self.avg_weekly_loss(entries),
            max_weekly_loss: self.max_weekly_loss(entries),
        }
    }

    /// Weight lost between the oldest and newest entry; a net gain is 0.
    pub fn total_loss(&self, entries: &[WeightEntry]) -> f64 {
        let sorted = chronological(entries);
        match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.weight - last.weight).max(0.0),
            _ => 0.0,
        }
    }

    /// Total loss divided by the number of weeks spanned by the series.
    ///
    /// 0 when the series spans no time.
    pub fn avg_weekly_loss(&self, entries: &[WeightEntry]) -> f64 {
        let sorted = chronological(entries);
        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            return 0.0;
        };

        let seconds = (last.date - first.date).num_milliseconds() as f64 / 1000.0;
        let weeks = seconds / SECONDS_PER_WEEK;
        if weeks <= 0.0 {
            return 0.0;
        }
        self.total_loss(entries) / weeks
    }

    /// Largest drop between chronologically adjacent weekly averages.
    ///
    /// 0 with fewer than two weeks of data or when the series only gains.
    pub fn max_weekly_loss(&self, entries: &[WeightEntry]) -> f64 {
        self.weekly_averages(entries)
            .windows(2)
            .map(|pair| pair[0].average - pair[1].average)
            .fold(0.0, f64::max)
    }

    /// Entries grouped by ISO week of their UTC date, oldest week first.
    pub fn weekly_averages(&self, entries: &[WeightEntry]) -> Vec<WeeklyAverage> {
        let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
        for entry in entries {
            let iso = entry.date.iso_week();
            let bucket = buckets.entry((iso.year(), iso.week())).or_insert((0.0, 0));
            bucket.0 += entry.weight;
            bucket.1 += 1;
        }

        buckets
            .into_iter()
            .map(|((year, week), (sum, count))| WeeklyAverage {
                year,
                week,
                average: sum / count as f64,
                count,
            })
            .collect()
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self
    }
}
