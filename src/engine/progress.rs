use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{EpisodeId, QuizQuestion};
use crate::config::Rules;

use super::error::{EngineError, EngineResult};
use super::levels;

/// Cumulative learner progress: points, completion sets and quiz scores.
///
/// The current level is never stored; it is derived from `total_points`
/// (see [`super::levels::resolve_level`]). Field names serialize in the
/// camelCase convention of the app's stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    total_points: u32,
    episodes_completed: BTreeSet<EpisodeId>,
    quiz_scores: BTreeMap<EpisodeId, f64>,
    perfect_quizzes: BTreeSet<EpisodeId>,
    challenges_completed: BTreeSet<EpisodeId>,
    // Set once at creation; the parent dashboard measures days of use
    // from it, so it is not advanced by later activity.
    last_active: DateTime<Utc>,
    #[serde(default)]
    badges: BTreeSet<String>,
}

impl ProgressRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut record = Self {
            total_points: 0,
            episodes_completed: BTreeSet::new(),
            quiz_scores: BTreeMap::new(),
            perfect_quizzes: BTreeSet::new(),
            challenges_completed: BTreeSet::new(),
            last_active: now,
            badges: BTreeSet::new(),
        };
        record.grant_level_badges();
        record
    }

    /// Score a submitted answer set against an episode's quiz.
    ///
    /// The score is recorded on every submission, pass or fail, so the
    /// parent dashboard's average stays meaningful across failed attempts.
    /// Points are only awarded on a pass; failed quizzes can be retried
    /// without limit.
    pub fn submit_quiz(
        &mut self,
        episode: EpisodeId,
        answers: &[usize],
        quiz: &[QuizQuestion],
        rules: &Rules,
    ) -> EngineResult<QuizOutcome> {
        if answers.len() != quiz.len() {
            return Err(EngineError::AnswerCountMismatch {
                expected: quiz.len(),
                got: answers.len(),
            });
        }

        let total_questions = quiz.len() as u32;
        let correct_count = answers
            .iter()
            .zip(quiz)
            .filter(|(answer, question)| **answer == question.correct())
            .count() as u32;

        let score_percent = if total_questions == 0 {
            0.0
        } else {
            100.0 * correct_count as f64 / total_questions as f64
        };
        let passed = score_percent >= rules.pass_threshold();
        let perfect = total_questions > 0 && correct_count == total_questions;

        self.quiz_scores.insert(episode, score_percent);

        let mut points_earned = 0;
        if passed {
            points_earned = correct_count * rules.points_per_correct();
            if perfect {
                points_earned += rules.perfect_bonus();
                self.perfect_quizzes.insert(episode);
            }
            self.award_points(points_earned);
        }

        Ok(QuizOutcome {
            correct_count,
            total_questions,
            score_percent,
            passed,
            perfect,
            points_earned,
        })
    }

    /// Confirm an episode's real-world challenge.
    ///
    /// Idempotent: a challenge already on record changes nothing and awards
    /// nothing. Completing a challenge is what marks the episode complete.
    pub fn complete_challenge(&mut self, episode: EpisodeId, rules: &Rules) -> ChallengeOutcome {
        if self.challenges_completed.contains(&episode) {
            return ChallengeOutcome {
                newly_completed: false,
                points_earned: 0,
            };
        }

        self.challenges_completed.insert(episode);
        self.episodes_completed.insert(episode);
        self.award_points(rules.challenge_points());

        ChallengeOutcome {
            newly_completed: true,
            points_earned: rules.challenge_points(),
        }
    }

    /// Whether the recorded score for an episode meets the pass threshold.
    /// With a zero threshold any recorded submission qualifies.
    pub fn quiz_passed(&self, episode: EpisodeId, rules: &Rules) -> bool {
        self.quiz_scores
            .get(&episode)
            .is_some_and(|score| *score >= rules.pass_threshold())
    }

    fn award_points(&mut self, points: u32) {
        self.total_points += points;
        self.grant_level_badges();
    }

    fn grant_level_badges(&mut self) {
        for level in levels::reached(self.total_points) {
            self.badges.insert(level.badge_id());
        }
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn episodes_completed(&self) -> &BTreeSet<EpisodeId> {
        &self.episodes_completed
    }

    pub fn quiz_scores(&self) -> &BTreeMap<EpisodeId, f64> {
        &self.quiz_scores
    }

    pub fn score_for(&self, episode: EpisodeId) -> Option<f64> {
        self.quiz_scores.get(&episode).copied()
    }

    pub fn perfect_quizzes(&self) -> &BTreeSet<EpisodeId> {
        &self.perfect_quizzes
    }

    pub fn challenges_completed(&self) -> &BTreeSet<EpisodeId> {
        &self.challenges_completed
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn badges(&self) -> &BTreeSet<String> {
        &self.badges
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.contains(id)
    }
}

/// Result of one quiz submission.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    correct_count: u32,
    total_questions: u32,
    score_percent: f64,
    passed: bool,
    perfect: bool,
    points_earned: u32,
}

impl QuizOutcome {
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn score_percent(&self) -> f64 {
        self.score_percent
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn perfect(&self) -> bool {
        self.perfect
    }

    pub fn points_earned(&self) -> u32 {
        self.points_earned
    }
}

/// Result of one challenge confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeOutcome {
    newly_completed: bool,
    points_earned: u32,
}

impl ChallengeOutcome {
    pub fn newly_completed(&self) -> bool {
        self.newly_completed
    }

    pub fn points_earned(&self) -> u32 {
        self.points_earned
    }
}
