use chrono::{DateTime, Utc};

use super::progress::ProgressRecord;

/// Parent-dashboard aggregates, derived read-only from a progress record
/// and the catalog size.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    completion_rate: f64,
    average_score: u32,
    perfect_quizzes: u32,
    challenges_completed: u32,
    days_active: u32,
    points_per_day: u32,
}

impl DashboardStats {
    pub fn compute(progress: &ProgressRecord, catalog_size: usize, now: DateTime<Utc>) -> Self {
        let completion_rate = if catalog_size == 0 {
            0.0
        } else {
            100.0 * progress.episodes_completed().len() as f64 / catalog_size as f64
        };

        let scores = progress.quiz_scores();
        let average_score = if scores.is_empty() {
            0
        } else {
            (scores.values().sum::<f64>() / scores.len() as f64).round() as u32
        };

        // Days since tracking began, counting the first day; floored at one
        // so points-per-day never divides by zero.
        let days_active = ((now - progress.last_active()).num_days() + 1).max(1) as u32;
        let points_per_day = (progress.total_points() as f64 / days_active as f64).round() as u32;

        Self {
            completion_rate,
            average_score,
            perfect_quizzes: progress.perfect_quizzes().len() as u32,
            challenges_completed: progress.challenges_completed().len() as u32,
            days_active,
            points_per_day,
        }
    }

    pub fn completion_rate(&self) -> f64 {
        self.completion_rate
    }

    pub fn average_score(&self) -> u32 {
        self.average_score
    }

    pub fn perfect_quizzes(&self) -> u32 {
        self.perfect_quizzes
    }

    pub fn challenges_completed(&self) -> u32 {
        self.challenges_completed
    }

    pub fn days_active(&self) -> u32 {
        self.days_active
    }

    pub fn points_per_day(&self) -> u32 {
        self.points_per_day
    }
}
