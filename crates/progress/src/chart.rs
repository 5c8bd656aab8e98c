//! Trend chart data.

use std::ops::RangeInclusive;

use dontgiveup_core::{chronological, Time, WeightEntry};
use serde::{Deserialize, Serialize};

/// One plotted measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X axis
    pub date: Time,
    /// Y axis
    pub weight: f64,
}

/// Points for the trend line, oldest first.
pub fn chart_series(entries: &[WeightEntry]) -> Vec<ChartPoint> {
    chronological(entries)
        .into_iter()
        .map(|e| ChartPoint {
            date: e.date,
            weight: e.weight,
        })
        .collect()
}

/// Y axis range for the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDomain {
    /// Bottom of the axis
    pub lower: f64,
    /// Top of the axis
    pub upper: f64,
}

impl ChartDomain {
    /// Fit the axis around the entries with some padding.
    ///
    /// An empty series gets `0..=1`, a flat series is padded by 1 on each
    /// side, otherwise both ends get 10% of the range (at least 0.5).
    pub fn infer(entries: &[WeightEntry]) -> Self {
        let min = entries.iter().map(|e| e.weight).reduce(f64::min);
        let max = entries.iter().map(|e| e.weight).reduce(f64::max);

        match (min, max) {
            (Some(min), Some(max)) if min == max => Self {
                lower: min - 1.0,
                upper: max + 1.0,
            },
            (Some(min), Some(max)) => {
                let padding = ((max - min) * 0.1).max(0.5);
                Self {
                    lower: min - padding,
                    upper: max + padding,
                }
            }
            _ => Self {
                lower: 0.0,
                upper: 1.0,
            },
        }
    }

    /// Domain as a range.
    pub fn range(&self) -> RangeInclusive<f64> {
        self.lower..=self.upper
    }
}
