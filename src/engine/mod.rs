//! The progress/streak/level core. All state mutation is routed through
//! [`Tracker`]; presentation code only reads.

mod error;
pub use error::{EngineError, EngineResult};

pub mod levels;
pub use levels::{LEVELS, Level, LevelStatus, resolve_level};

mod progress;
pub use progress::{ChallengeOutcome, ProgressRecord, QuizOutcome};

mod stats;
pub use stats::DashboardStats;

mod streak;
pub use streak::{ActivityUpdate, STREAK_BADGES, StreakBadge, StreakRecord};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::catalog::Episode;
use crate::config::Rules;
use crate::store::{PROGRESS_KEY, STREAK_KEY, StateStore, StoreError};

/// Owns both persisted records plus the configured rules, and writes every
/// change back to the store. One instance per running app.
#[derive(Debug)]
pub struct Tracker<S: StateStore> {
    store: S,
    rules: Rules,
    progress: ProgressRecord,
    streak: StreakRecord,
}

impl<S: StateStore> Tracker<S> {
    /// Load both records from the store, falling back to fresh defaults
    /// when a record is missing or unreadable (an unreadable record is
    /// discarded wholesale, never patched field by field).
    pub fn open(store: S, rules: Rules, now: DateTime<Utc>) -> EngineResult<Self> {
        let progress =
            load_record(&store, PROGRESS_KEY)?.unwrap_or_else(|| ProgressRecord::new(now));
        let streak =
            load_record(&store, STREAK_KEY)?.unwrap_or_else(|| StreakRecord::new(now.date_naive()));

        Ok(Self {
            store,
            rules,
            progress,
            streak,
        })
    }

    /// Fold a day of activity into the streak, persisting when it changed.
    /// Safe to call any number of times per day.
    #[tracing::instrument(skip(self))]
    pub fn record_activity(&mut self, today: NaiveDate) -> EngineResult<ActivityUpdate> {
        let update = self.streak.record_activity(today);
        if update.changed() {
            self.persist_streak()?;
        }
        Ok(update)
    }

    /// Score a quiz submission for an episode. Counts as activity for the
    /// day; both records are persisted.
    #[tracing::instrument(skip(self, episode, answers), fields(episode = episode.number()))]
    pub fn submit_quiz(
        &mut self,
        episode: &Episode,
        answers: &[usize],
        now: DateTime<Utc>,
    ) -> EngineResult<QuizOutcome> {
        self.record_activity(now.date_naive())?;
        let outcome = self
            .progress
            .submit_quiz(episode.id(), answers, episode.quiz(), &self.rules)?;
        self.persist_progress()?;
        Ok(outcome)
    }

    /// Confirm an episode's challenge. Gated on the recorded quiz score
    /// meeting the pass threshold; idempotent on repeat confirmations.
    #[tracing::instrument(skip(self, episode), fields(episode = episode.number()))]
    pub fn complete_challenge(
        &mut self,
        episode: &Episode,
        now: DateTime<Utc>,
    ) -> EngineResult<ChallengeOutcome> {
        if !self.progress.quiz_passed(episode.id(), &self.rules) {
            return Err(EngineError::QuizNotPassed(episode.id()));
        }

        self.record_activity(now.date_naive())?;
        let outcome = self.progress.complete_challenge(episode.id(), &self.rules);
        if outcome.newly_completed() {
            self.persist_progress()?;
        }
        Ok(outcome)
    }

    /// Drop both records from the store and start over.
    pub fn reset(&mut self, now: DateTime<Utc>) -> EngineResult<()> {
        self.store.clear(PROGRESS_KEY)?;
        self.store.clear(STREAK_KEY)?;
        self.progress = ProgressRecord::new(now);
        self.streak = StreakRecord::new(now.date_naive());
        Ok(())
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn streak(&self) -> &StreakRecord {
        &self.streak
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn level_status(&self) -> LevelStatus {
        resolve_level(self.progress.total_points())
    }

    pub fn stats(&self, catalog_size: usize, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.progress, catalog_size, now)
    }

    /// Hand the store back, e.g. to reopen a tracker over the same state.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_progress(&mut self) -> EngineResult<()> {
        let raw = serde_json::to_string(&self.progress).map_err(StoreError::from)?;
        self.store.set(PROGRESS_KEY, &raw)?;
        Ok(())
    }

    fn persist_streak(&mut self) -> EngineResult<()> {
        let raw = serde_json::to_string(&self.streak).map_err(StoreError::from)?;
        self.store.set(STREAK_KEY, &raw)?;
        Ok(())
    }
}

fn load_record<S: StateStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> EngineResult<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!("discarding unreadable record at {key}: {e}");
            Ok(None)
        }
    }
}
