//! Progress tracking service.
//!
//! Wraps a [`Storage`] and re-establishes every objective's `reached_at`
//! after each entry mutation. Calls are serialized by the store lock. Each
//! mutation reads the stores and recomputes before writing anything, so a
//! failed read leaves the stores untouched. A failed write part way through
//! can leave objectives stale until the next entry mutation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dontgiveup_core::{
    parse_weight, EntryId, InputError, Objective, ObjectiveId, ThemePreference, Time, WeightEntry,
};
use dontgiveup_storage::Storage;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::calculator::{Progress, ProgressCalculator};
use crate::chart::ChartDomain;
use crate::evaluator::ObjectiveEvaluator;
use crate::stats::{StatsAggregator, WeeklyAverage, WeightStats};
use crate::Result;

/// Read side of the tracker.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Progress toward the active objective, if displayable.
    async fn progress(&self) -> Result<Option<Progress>>;

    /// Summary statistics over all entries.
    async fn stats(&self) -> Result<WeightStats>;

    /// Take a progress snapshot.
    async fn snapshot(&self) -> Result<ProgressSnapshot>;
}

/// Everything the screens render, computed from one read of the stores.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Objectives, highest target first
    pub objectives: Vec<Objective>,

    /// Progress toward the active objective
    pub progress: Option<Progress>,

    /// Summary statistics
    pub stats: WeightStats,

    /// Weekly averages, oldest week first
    pub weekly: Vec<WeeklyAverage>,

    /// Y axis range for the trend chart
    pub chart_domain: ChartDomain,
}

/// Tracker over a weight/objective store.
pub struct WeightTracker<S: Storage> {
    storage: Mutex<S>,
    evaluator: ObjectiveEvaluator,
    calculator: ProgressCalculator,
    aggregator: StatsAggregator,
}

impl<S: Storage> WeightTracker<S> {
    /// Create a new tracker.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
            evaluator: ObjectiveEvaluator,
            calculator: ProgressCalculator::default(),
            aggregator: StatsAggregator,
        }
    }

    /// Use a custom progress calculator.
    pub fn with_calculator(mut self, calculator: ProgressCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Give back the underlying store.
    pub fn into_inner(self) -> S {
        self.storage.into_inner()
    }

    /// Log a measurement, then re-evaluate all objectives.
    pub async fn add_entry(&self, date: Time, weight: f64) -> Result<WeightEntry> {
        validate(weight)?;
        let entry = WeightEntry::new(date, weight);

        let mut storage = self.storage.lock().await;
        let mut entries = storage.list_entries().await?;
        entries.push(entry.clone());
        let changed = self.reevaluate(&*storage, &entries).await?;

        storage.save_entry(&entry).await?;
        info!(entry = %entry.id, weight, date = %entry.date, "entry added");
        save_objectives(&mut *storage, &changed).await?;

        Ok(entry)
    }

    /// Log a measurement typed by the user.
    pub async fn add_entry_text(&self, date: Time, text: &str) -> Result<WeightEntry> {
        let weight = parse_weight(text)?;
        self.add_entry(date, weight).await
    }

    /// Delete a batch of entries, then re-evaluate all objectives.
    pub async fn delete_entries(&self, ids: &[EntryId]) -> Result<usize> {
        let mut storage = self.storage.lock().await;
        let mut entries = storage.list_entries().await?;
        entries.retain(|e| !ids.contains(&e.id));
        let changed = self.reevaluate(&*storage, &entries).await?;

        let removed = storage.delete_entries(ids).await?;
        info!(requested = ids.len(), removed, "entries deleted");
        save_objectives(&mut *storage, &changed).await?;

        Ok(removed)
    }

    /// Create an objective now.
    pub async fn add_objective(&self, weight: f64) -> Result<Objective> {
        self.add_objective_at(weight, Utc::now()).await
    }

    /// Create an objective typed by the user.
    pub async fn add_objective_text(&self, text: &str) -> Result<Objective> {
        let weight = parse_weight(text)?;
        self.add_objective(weight).await
    }

    /// Create an objective with an explicit creation time.
    ///
    /// Its `reached_at` is derived from the existing entries before it is
    /// stored.
    pub async fn add_objective_at(&self, weight: f64, created_at: Time) -> Result<Objective> {
        validate(weight)?;
        let mut objective = Objective::with_created_at(weight, created_at);

        let mut storage = self.storage.lock().await;
        let entries = storage.list_entries().await?;
        objective.reached_at = self.evaluator.reached_at(weight, &entries);
        storage.save_objective(&objective).await?;
        info!(
            objective = %objective.id,
            weight,
            reached = objective.is_reached(),
            "objective added"
        );

        Ok(objective)
    }

    /// Delete a batch of objectives.
    pub async fn delete_objectives(&self, ids: &[ObjectiveId]) -> Result<usize> {
        let mut storage = self.storage.lock().await;
        let removed = storage.delete_objectives(ids).await?;
        info!(requested = ids.len(), removed, "objectives deleted");
        Ok(removed)
    }

    /// Entries, newest first.
    pub async fn entries(&self) -> Result<Vec<WeightEntry>> {
        let mut entries = self.storage.lock().await.list_entries().await?;
        entries.reverse();
        Ok(entries)
    }

    /// Objectives, highest target first.
    pub async fn objectives(&self) -> Result<Vec<Objective>> {
        Ok(self.storage.lock().await.list_objectives().await?)
    }

    /// Weekly averages, oldest week first.
    pub async fn weekly_averages(&self) -> Result<Vec<WeeklyAverage>> {
        let entries = self.storage.lock().await.list_entries().await?;
        Ok(self.aggregator.weekly_averages(&entries))
    }

    /// Stored theme preference.
    pub async fn theme(&self) -> Result<ThemePreference> {
        Ok(self.storage.lock().await.load_theme().await?)
    }

    /// Flip and persist the theme preference.
    pub async fn toggle_theme(&self) -> Result<ThemePreference> {
        let mut storage = self.storage.lock().await;
        let mut theme = storage.load_theme().await?;
        theme.toggle();
        storage.save_theme(&theme).await?;
        debug!(dark = theme.is_dark_mode, "theme toggled");
        Ok(theme)
    }

    /// Recompute all stored objectives against the post-mutation `entries`,
    /// returning the ones whose `reached_at` changed.
    async fn reevaluate(&self, storage: &S, entries: &[WeightEntry]) -> Result<Vec<Objective>> {
        let mut objectives = storage.list_objectives().await?;
        let changed = self.evaluator.evaluate(entries, &mut objectives);
        objectives.retain(|o| changed.contains(&o.id));
        Ok(objectives)
    }
}

async fn save_objectives<S: Storage>(storage: &mut S, objectives: &[Objective]) -> Result<()> {
    for objective in objectives {
        storage.save_objective(objective).await?;
    }
    Ok(())
}

#[async_trait]
impl<S: Storage + 'static> ProgressTracker for WeightTracker<S> {
    async fn progress(&self) -> Result<Option<Progress>> {
        let storage = self.storage.lock().await;
        let entries = storage.list_entries().await?;
        let objectives = storage.list_objectives().await?;
        Ok(self.calculator.progress(&entries, &objectives))
    }

    async fn stats(&self) -> Result<WeightStats> {
        let entries = self.storage.lock().await.list_entries().await?;
        Ok(self.aggregator.compute(&entries))
    }

    async fn snapshot(&self) -> Result<ProgressSnapshot> {
        let storage = self.storage.lock().await;
        let entries = storage.list_entries().await?;
        let objectives = storage.list_objectives().await?;

        Ok(ProgressSnapshot {
            timestamp: Utc::now(),
            progress: self.calculator.progress(&entries, &objectives),
            stats: self.aggregator.compute(&entries),
            weekly: self.aggregator.weekly_averages(&entries),
            chart_domain: ChartDomain::infer(&entries),
            objectives,
        })
    }
}

fn validate(weight: f64) -> std::result::Result<(), InputError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange(weight))
    }
}
