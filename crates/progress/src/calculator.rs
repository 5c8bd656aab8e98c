//! Progress toward the active objective.

use std::cmp::Ordering;

use dontgiveup_core::{chronological, Objective, ObjectiveId, WeightEntry};
use serde::{Deserialize, Serialize};

/// Smallest denominator used when start and goal nearly coincide.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Which way the weight has to move to reach the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalDirection {
    /// Goal is below the starting weight, or equal to it
    Loss,
    /// Goal is above the starting weight
    Gain,
}

/// Percentage complete against one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Objective the percentage is measured against
    pub objective_id: ObjectiveId,

    /// Weight of the oldest entry
    pub start: f64,

    /// Weight of the most recent entry
    pub current: f64,

    /// Target weight
    pub goal: f64,

    /// Direction implied by start and goal
    pub direction: GoalDirection,

    /// Percentage complete, clamped to 0..=100
    pub percentage: f64,
}

impl Progress {
    /// Percentage rounded to the nearest whole percent.
    pub fn rounded(&self) -> u8 {
        self.percentage.round() as u8
    }
}

/// Derives a single progress percentage from entries and objectives.
///
/// Pure: objectives are only read.
#[derive(Debug, Clone, Copy)]
pub struct ProgressCalculator {
    /// Floor for the start-to-goal distance
    pub epsilon: f64,
}

impl Default for ProgressCalculator {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ProgressCalculator {
    /// Create a calculator with a custom epsilon floor.
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Pick the objective progress is measured against.
    ///
    /// Highest target among unreached objectives, or the highest overall
    /// once every objective is reached. Equal targets resolve to the
    /// earliest created, then the smallest id.
    pub fn select_target<'a>(&self, objectives: &'a [Objective]) -> Option<&'a Objective> {
        objectives
            .iter()
            .filter(|o| !o.is_reached())
            .min_by(|a, b| target_rank(a, b))
            .or_else(|| objectives.iter().min_by(|a, b| target_rank(a, b)))
    }

    /// Percentage of the way from `start` to `goal`, clamped to 0..=100.
    ///
    /// `start == goal` is read as a loss goal: 100 once `current <= goal`.
    pub fn percentage(&self, start: f64, current: f64, goal: f64) -> f64 {
        let raw = if start == goal {
            if current <= goal {
                100.0
            } else {
                0.0
            }
        } else {
            match direction(start, goal) {
                GoalDirection::Loss => (start - current) / (start - goal).max(self.epsilon) * 100.0,
                GoalDirection::Gain => (current - start) / (goal - start).max(self.epsilon) * 100.0,
            }
        };

        if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 100.0)
        }
    }

    /// Progress against the selected objective, or `None` when there are no
    /// entries or no objectives.
    pub fn progress(&self, entries: &[WeightEntry], objectives: &[Objective]) -> Option<Progress> {
        let target = self.select_target(objectives)?;
        let sorted = chronological(entries);
        let start = sorted.first()?.weight;
        let current = sorted.last()?.weight;
        let goal = target.weight;

        Some(Progress {
            objective_id: target.id,
            start,
            current,
            goal,
            direction: direction(start, goal),
            percentage: self.percentage(start, current, goal),
        })
    }
}

fn direction(start: f64, goal: f64) -> GoalDirection {
    if start < goal {
        GoalDirection::Gain
    } else {
        GoalDirection::Loss
    }
}

fn target_rank(a: &Objective, b: &Objective) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then(a.created_at.cmp(&b.created_at))
        .then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use dontgiveup_core::Time;
    use proptest::prelude::*;

    fn day(n: i64) -> Time {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap() + Duration::days(n)
    }

    fn entries(weights: &[f64]) -> Vec<WeightEntry> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| WeightEntry::new(day(i as i64 + 1), *w))
            .collect()
    }

    fn reached(weight: f64, created: i64, at: i64) -> Objective {
        let mut o = Objective::with_created_at(weight, day(created));
        o.reached_at = Some(day(at));
        o
    }

    #[test]
    fn test_reached_target_is_complete() {
        let calc = ProgressCalculator::default();
        let objectives = vec![reached(180.0, 0, 3)];

        let progress = calc.progress(&entries(&[200.0, 190.0, 180.0]), &objectives).unwrap();
        assert_eq!(progress.start, 200.0);
        assert_eq!(progress.current, 180.0);
        assert_eq!(progress.rounded(), 100);
    }

    #[test]
    fn test_partial_loss_rounds_to_whole_percent() {
        let calc = ProgressCalculator::default();
        let objectives = vec![Objective::with_created_at(170.0, day(0))];

        let progress = calc.progress(&entries(&[200.0, 190.0, 180.0]), &objectives).unwrap();
        assert!((progress.percentage - 66.666).abs() < 0.01);
        assert_eq!(progress.rounded(), 67);
        assert_eq!(progress.direction, GoalDirection::Loss);
    }

    #[test]
    fn test_gain_goal() {
        let calc = ProgressCalculator::default();
        let objectives = vec![Objective::with_created_at(130.0, day(0))];

        let progress = calc.progress(&entries(&[120.0, 122.5, 125.0]), &objectives).unwrap();
        assert_eq!(progress.direction, GoalDirection::Gain);
        assert_eq!(progress.rounded(), 50);
    }

    #[test]
    fn test_uses_chronological_endpoints_not_input_order() {
        let calc = ProgressCalculator::default();
        let objectives = vec![Objective::with_created_at(180.0, day(0))];
        let shuffled = vec![
            WeightEntry::new(day(5), 190.0),
            WeightEntry::new(day(1), 200.0),
            WeightEntry::new(day(3), 195.0),
        ];

        let progress = calc.progress(&shuffled, &objectives).unwrap();
        assert_eq!(progress.start, 200.0);
        assert_eq!(progress.current, 190.0);
        assert_eq!(progress.rounded(), 50);
    }

    #[test]
    fn test_no_progress_without_data() {
        let calc = ProgressCalculator::default();
        let objectives = vec![Objective::new(180.0)];

        assert!(calc.progress(&[], &objectives).is_none());
        assert!(calc.progress(&entries(&[200.0]), &[]).is_none());
    }

    #[test]
    fn test_moving_away_from_goal_clamps_to_zero() {
        let calc = ProgressCalculator::default();
        assert_eq!(calc.percentage(200.0, 210.0, 180.0), 0.0);
        assert_eq!(calc.percentage(200.0, 170.0, 180.0), 100.0);
    }

    #[test]
    fn test_start_equal_goal_uses_loss_reading() {
        let calc = ProgressCalculator::default();
        assert_eq!(calc.percentage(180.0, 180.0, 180.0), 100.0);
        assert_eq!(calc.percentage(180.0, 179.0, 180.0), 100.0);
        assert_eq!(calc.percentage(180.0, 181.0, 180.0), 0.0);
    }

    #[test]
    fn test_epsilon_floor_avoids_division_blowup() {
        let calc = ProgressCalculator::default();
        let pct = calc.percentage(180.00001, 180.0, 180.0);
        assert!(pct.is_finite());
        assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn test_prefers_highest_unreached_target() {
        let calc = ProgressCalculator::default();
        let objectives = vec![
            reached(190.0, 0, 2),
            Objective::with_created_at(175.0, day(0)),
            Objective::with_created_at(180.0, day(0)),
        ];

        assert_eq!(calc.select_target(&objectives).unwrap().weight, 180.0);
    }

    #[test]
    fn test_falls_back_to_highest_when_all_reached() {
        let calc = ProgressCalculator::default();
        let objectives = vec![reached(180.0, 0, 3), reached(190.0, 0, 2)];

        assert_eq!(calc.select_target(&objectives).unwrap().weight, 190.0);
    }

    #[test]
    fn test_equal_targets_pick_earliest_created() {
        let calc = ProgressCalculator::default();
        let later = Objective::with_created_at(180.0, day(5));
        let earlier = Objective::with_created_at(180.0, day(1));
        let objectives = vec![later, earlier.clone()];

        assert_eq!(calc.select_target(&objectives).unwrap().id, earlier.id);
    }

    proptest! {
        #[test]
        fn percentage_is_bounded(
            start in 50.0f64..400.0,
            current in 50.0f64..400.0,
            goal in 50.0f64..400.0
        ) {
            let pct = ProgressCalculator::default().percentage(start, current, goal);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn progress_is_bounded(
            weights in prop::collection::vec(50.0f64..400.0, 1..20),
            targets in prop::collection::vec(50.0f64..400.0, 1..5)
        ) {
            let objectives: Vec<Objective> = targets
                .iter()
                .map(|w| Objective::with_created_at(*w, day(0)))
                .collect();
            let progress = ProgressCalculator::default()
                .progress(&entries(&weights), &objectives)
                .unwrap();
            prop_assert!(progress.rounded() <= 100);
            prop_assert!((0.0..=100.0).contains(&progress.percentage));
        }
    }
}
