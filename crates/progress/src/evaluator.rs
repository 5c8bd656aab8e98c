//! Objective evaluation.
//!
//! Re-derives every objective's `reached_at` from the entry set. The full
//! recomputation is the reference; the insert path may use the incremental
//! variant because adding an entry can only move `reached_at` earlier.

use dontgiveup_core::{Objective, ObjectiveId, Time, WeightEntry};
use tracing::{debug, info};

/// Recomputes reached timestamps for objectives.
pub struct ObjectiveEvaluator;

impl ObjectiveEvaluator {
    /// Earliest date among entries weighing at most `target`.
    pub fn reached_at(&self, target: f64, entries: &[WeightEntry]) -> Option<Time> {
        entries
            .iter()
            .filter(|e| e.weight <= target)
            .map(|e| e.date)
            .min()
    }

    /// Recompute `reached_at` for every objective from the full entry set.
    ///
    /// Returns the ids of objectives whose `reached_at` changed. Running it
    /// again on the same inputs changes nothing.
    pub fn evaluate(
        &self,
        entries: &[WeightEntry],
        objectives: &mut [Objective],
    ) -> Vec<ObjectiveId> {
        let mut changed = Vec::new();

        for objective in objectives.iter_mut() {
            let reached_at = self.reached_at(objective.weight, entries);
            if reached_at != objective.reached_at {
                log_transition(objective, reached_at);
                objective.reached_at = reached_at;
                changed.push(objective.id);
            }
        }

        debug!(
            entries = entries.len(),
            objectives = objectives.len(),
            changed = changed.len(),
            "objectives evaluated"
        );
        changed
    }

    /// Fold one newly inserted entry into already evaluated objectives.
    ///
    /// Equivalent to [`evaluate`](Self::evaluate) on the post-insert entry
    /// set, provided the objectives were consistent before the insert. Not
    /// valid after deletions.
    pub fn apply_inserted(
        &self,
        entry: &WeightEntry,
        objectives: &mut [Objective],
    ) -> Vec<ObjectiveId> {
        let mut changed = Vec::new();

        for objective in objectives.iter_mut() {
            if entry.weight > objective.weight {
                continue;
            }
            let earlier = match objective.reached_at {
                Some(reached) => entry.date < reached,
                None => true,
            };
            if earlier {
                log_transition(objective, Some(entry.date));
                objective.reached_at = Some(entry.date);
                changed.push(objective.id);
            }
        }

        changed
    }
}

impl Default for ObjectiveEvaluator {
    fn default() -> Self {
        Self
    }
}

fn log_transition(objective: &Objective, reached_at: Option<Time>) {
    let id = objective.id;
    let target = objective.weight;
    match (objective.reached_at, reached_at) {
        (None, Some(at)) => info!(objective = %id, target, %at, "objective reached"),
        (Some(_), None) => info!(objective = %id, target, "objective no longer reached"),
        (_, _) => debug!(objective = %id, target, ?reached_at, "reached date moved"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn day(n: i64) -> Time {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap() + Duration::days(n)
    }

    fn scenario_entries() -> Vec<WeightEntry> {
        vec![
            WeightEntry::new(day(1), 200.0),
            WeightEntry::new(day(2), 190.0),
            WeightEntry::new(day(3), 180.0),
        ]
    }

    #[test]
    fn test_reached_by_matching_entry() {
        let entries = scenario_entries();
        let mut objectives = vec![Objective::with_created_at(180.0, day(0))];

        let changed = ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert_eq!(changed, vec![objectives[0].id]);
        assert_eq!(objectives[0].reached_at, Some(day(3)));
    }

    #[test]
    fn test_unreachable_target_stays_none() {
        let entries = scenario_entries();
        let mut objectives = vec![Objective::with_created_at(170.0, day(0))];

        let changed = ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert!(changed.is_empty());
        assert_eq!(objectives[0].reached_at, None);
    }

    #[test]
    fn test_deleting_reaching_entry_unreaches() {
        let mut entries = scenario_entries();
        let mut objectives = vec![Objective::with_created_at(180.0, day(0))];
        ObjectiveEvaluator.evaluate(&entries, &mut objectives);

        entries.retain(|e| e.date != day(3));
        let changed = ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert_eq!(changed.len(), 1);
        assert_eq!(objectives[0].reached_at, None);
    }

    #[test]
    fn test_reached_retroactively_by_past_entry() {
        // Created after the entry that reaches it.
        let entries = scenario_entries();
        let mut objectives = vec![Objective::with_created_at(195.0, day(10))];

        ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert_eq!(objectives[0].reached_at, Some(day(2)));
    }

    #[test]
    fn test_earliest_date_wins_with_out_of_order_entries() {
        let entries = vec![
            WeightEntry::new(day(9), 175.0),
            WeightEntry::new(day(4), 179.0),
            WeightEntry::new(day(6), 185.0),
        ];
        let mut objectives = vec![Objective::with_created_at(180.0, day(0))];

        ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert_eq!(objectives[0].reached_at, Some(day(4)));
    }

    #[test]
    fn test_empty_entries_clear_everything() {
        let mut reached = Objective::with_created_at(180.0, day(0));
        reached.reached_at = Some(day(1));
        let mut objectives = vec![reached];

        ObjectiveEvaluator.evaluate(&[], &mut objectives);
        assert_eq!(objectives[0].reached_at, None);
    }

    #[test]
    fn test_apply_inserted_moves_reached_earlier() {
        let entries = scenario_entries();
        let mut objectives = vec![Objective::with_created_at(190.0, day(0))];
        ObjectiveEvaluator.evaluate(&entries, &mut objectives);
        assert_eq!(objectives[0].reached_at, Some(day(2)));

        let backdated = WeightEntry::new(day(-5), 188.0);
        let changed = ObjectiveEvaluator.apply_inserted(&backdated, &mut objectives);
        assert_eq!(changed.len(), 1);
        assert_eq!(objectives[0].reached_at, Some(day(-5)));

        let later = WeightEntry::new(day(20), 150.0);
        assert!(ObjectiveEvaluator.apply_inserted(&later, &mut objectives).is_empty());
    }

    fn arb_entries() -> impl Strategy<Value = Vec<WeightEntry>> {
        prop::collection::vec((0i64..120, 150.0f64..220.0), 0..25).prop_map(|raw| {
            raw.into_iter()
                .map(|(d, w)| WeightEntry::new(day(d), w))
                .collect()
        })
    }

    fn arb_targets() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(150.0f64..220.0, 1..6)
    }

    fn objectives_for(targets: &[f64]) -> Vec<Objective> {
        targets
            .iter()
            .map(|w| Objective::with_created_at(*w, day(0)))
            .collect()
    }

    proptest! {
        #[test]
        fn evaluation_is_idempotent(entries in arb_entries(), targets in arb_targets()) {
            let mut objectives = objectives_for(&targets);
            ObjectiveEvaluator.evaluate(&entries, &mut objectives);
            let first = objectives.clone();

            let changed = ObjectiveEvaluator.evaluate(&entries, &mut objectives);
            prop_assert!(changed.is_empty());
            prop_assert_eq!(first, objectives);
        }

        #[test]
        fn insert_never_moves_reached_later(
            entries in arb_entries(),
            targets in arb_targets(),
            (d, w) in (0i64..120, 150.0f64..220.0)
        ) {
            let mut objectives = objectives_for(&targets);
            ObjectiveEvaluator.evaluate(&entries, &mut objectives);
            let before = objectives.clone();

            let mut grown = entries.clone();
            let inserted = WeightEntry::new(day(d), w);
            grown.push(inserted.clone());
            ObjectiveEvaluator.evaluate(&grown, &mut objectives);

            for (old, new) in before.iter().zip(objectives.iter()) {
                match (old.reached_at, new.reached_at) {
                    (Some(o), Some(n)) => {
                        prop_assert!(n <= o);
                    }
                    (None, Some(n)) => {
                        prop_assert!(n <= inserted.date);
                    }
                    (None, None) => {}
                    (Some(_), None) => {
                        prop_assert!(false, "insert un-reached an objective");
                    }
                }
            }
        }

        #[test]
        fn incremental_insert_matches_full_recompute(
            entries in arb_entries(),
            targets in arb_targets(),
            (d, w) in (0i64..120, 150.0f64..220.0)
        ) {
            let mut incremental = objectives_for(&targets);
            ObjectiveEvaluator.evaluate(&entries, &mut incremental);
            let mut full = incremental.clone();

            let inserted = WeightEntry::new(day(d), w);
            ObjectiveEvaluator.apply_inserted(&inserted, &mut incremental);

            let mut grown = entries.clone();
            grown.push(inserted);
            ObjectiveEvaluator.evaluate(&grown, &mut full);

            prop_assert_eq!(incremental, full);
        }

        #[test]
        fn deletion_matches_fresh_evaluation(
            entries in arb_entries(),
            targets in arb_targets(),
            pick in any::<prop::sample::Index>()
        ) {
            prop_assume!(!entries.is_empty());
            let mut objectives = objectives_for(&targets);
            ObjectiveEvaluator.evaluate(&entries, &mut objectives);

            let mut remaining = entries.clone();
            remaining.remove(pick.index(entries.len()));
            ObjectiveEvaluator.evaluate(&remaining, &mut objectives);

            let mut fresh = objectives_for(&targets);
            for (f, o) in fresh.iter_mut().zip(objectives.iter()) {
                f.id = o.id;
            }
            ObjectiveEvaluator.evaluate(&remaining, &mut fresh);
            prop_assert_eq!(fresh, objectives);
        }
    }
}
