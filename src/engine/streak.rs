use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak badge table, ascending by days required. Ids are stable and are
/// what the streak record persists.
pub static STREAK_BADGES: &[StreakBadge] = &[
    StreakBadge {
        id: "seven-day",
        name: "Aprendiz Dedicado",
        description: "7 días de aprendizaje consecutivo",
        icon: "🔥",
        days_required: 7,
        color: "#FF6B6B",
    },
    StreakBadge {
        id: "thirty-day",
        name: "Guerrero Imparable",
        description: "30 días de aprendizaje consecutivo",
        icon: "⚡",
        days_required: 30,
        color: "#FFD93D",
    },
    StreakBadge {
        id: "hundred-day",
        name: "Leyenda Viviente",
        description: "100 días de aprendizaje consecutivo",
        icon: "👑",
        days_required: 100,
        color: "#6BCB77",
    },
];

#[derive(Debug, Clone)]
pub struct StreakBadge {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    days_required: u32,
    color: &'static str,
}

impl StreakBadge {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }

    pub fn days_required(&self) -> u32 {
        self.days_required
    }

    pub fn color(&self) -> &'static str {
        self.color
    }
}

/// Consecutive-day activity counter.
///
/// Day granularity only; time of day never matters. `longest_streak` is
/// monotonic and `unlocked_badges` only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    current_streak: u32,
    longest_streak: u32,
    last_activity_date: NaiveDate,
    streak_start_date: NaiveDate,
    #[serde(default)]
    unlocked_badges: BTreeSet<String>,
}

impl StreakRecord {
    /// Fresh record for a learner whose first-ever activity is `today`.
    /// The first day counts as day one of the streak.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_streak: 1,
            longest_streak: 1,
            last_activity_date: today,
            streak_start_date: today,
            unlocked_badges: BTreeSet::new(),
        }
    }

    /// Fold one day of activity into the streak.
    ///
    /// Same-day calls are no-ops, the day after extends the streak, and any
    /// other gap (including a clock that moved backwards) resets it to one.
    /// `longest_streak` is never lowered.
    pub fn record_activity(&mut self, today: NaiveDate) -> ActivityUpdate {
        let days = (today - self.last_activity_date).num_days();

        match days {
            0 => ActivityUpdate::unchanged(),
            1 => {
                self.current_streak += 1;
                self.last_activity_date = today;
                if self.current_streak > self.longest_streak {
                    self.longest_streak = self.current_streak;
                }
                ActivityUpdate::extended(self.unlock_reached_badges())
            }
            _ => {
                self.current_streak = 1;
                self.last_activity_date = today;
                self.streak_start_date = today;
                ActivityUpdate::reset()
            }
        }
    }

    // Unlocks every badge whose threshold the streak has reached, so a
    // record imported mid-streak still earns the earlier badges.
    fn unlock_reached_badges(&mut self) -> Vec<&'static StreakBadge> {
        STREAK_BADGES
            .iter()
            .filter(|badge| {
                self.current_streak >= badge.days_required
                    && self.unlocked_badges.insert(badge.id.to_string())
            })
            .collect()
    }

    /// First badge not yet unlocked, in ascending threshold order.
    pub fn next_badge(&self) -> Option<&'static StreakBadge> {
        STREAK_BADGES
            .iter()
            .find(|badge| !self.unlocked_badges.contains(badge.id))
    }

    /// Days of streak still needed for [`Self::next_badge`]; zero when every
    /// badge is unlocked.
    pub fn days_until_next_badge(&self) -> u32 {
        self.next_badge()
            .map(|badge| badge.days_required.saturating_sub(self.current_streak))
            .unwrap_or(0)
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn last_activity_date(&self) -> NaiveDate {
        self.last_activity_date
    }

    pub fn streak_start_date(&self) -> NaiveDate {
        self.streak_start_date
    }

    pub fn unlocked_badges(&self) -> &BTreeSet<String> {
        &self.unlocked_badges
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.unlocked_badges.contains(id)
    }
}

/// What a call to [`StreakRecord::record_activity`] changed.
#[derive(Debug, Clone)]
pub struct ActivityUpdate {
    extended: bool,
    reset: bool,
    unlocked: Vec<&'static StreakBadge>,
}

impl ActivityUpdate {
    fn unchanged() -> Self {
        Self {
            extended: false,
            reset: false,
            unlocked: Vec::new(),
        }
    }

    fn extended(unlocked: Vec<&'static StreakBadge>) -> Self {
        Self {
            extended: true,
            reset: false,
            unlocked,
        }
    }

    fn reset() -> Self {
        Self {
            extended: false,
            reset: true,
            unlocked: Vec::new(),
        }
    }

    pub fn streak_extended(&self) -> bool {
        self.extended
    }

    pub fn streak_reset(&self) -> bool {
        self.reset
    }

    /// Record changed and needs to be written back.
    pub fn changed(&self) -> bool {
        self.extended || self.reset
    }

    pub fn unlocked(&self) -> &[&'static StreakBadge] {
        &self.unlocked
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Duration::days(offset)
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let mut streak = StreakRecord::new(day(0));
        let before = streak.clone();

        let update = streak.record_activity(day(0));
        assert!(!update.changed());

        let update = streak.record_activity(day(0));
        assert!(!update.changed());
        assert_eq!(streak, before);
    }

    #[test]
    fn test_consecutive_day_extends() {
        let mut streak = StreakRecord::new(day(0));

        for offset in 1..=5 {
            let update = streak.record_activity(day(offset));
            assert!(update.streak_extended());
        }

        assert_eq!(streak.current_streak(), 6);
        assert_eq!(streak.longest_streak(), 6);
        assert_eq!(streak.last_activity_date(), day(5));
        assert_eq!(streak.streak_start_date(), day(0));
    }

    #[test]
    fn test_seven_day_badge_unlocks_exactly_once() {
        let mut streak = StreakRecord::new(day(0));
        for offset in 1..=5 {
            streak.record_activity(day(offset));
        }
        assert_eq!(streak.current_streak(), 6);
        assert!(!streak.has_badge("seven-day"));

        let update = streak.record_activity(day(6));
        assert_eq!(streak.current_streak(), 7);
        assert_eq!(update.unlocked().len(), 1);
        assert_eq!(update.unlocked()[0].id(), "seven-day");

        // already unlocked on subsequent days
        let update = streak.record_activity(day(7));
        assert!(update.unlocked().is_empty());
        assert!(streak.has_badge("seven-day"));
    }

    #[test]
    fn test_gap_resets_but_longest_survives() {
        let mut streak = StreakRecord::new(day(0));
        for offset in 1..=9 {
            streak.record_activity(day(offset));
        }
        assert_eq!(streak.current_streak(), 10);

        let update = streak.record_activity(day(14));
        assert!(update.streak_reset());
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.longest_streak(), 10);
        assert_eq!(streak.streak_start_date(), day(14));
        assert_eq!(streak.last_activity_date(), day(14));
    }

    #[test]
    fn test_backdated_activity_resets() {
        let mut streak = StreakRecord::new(day(5));
        streak.record_activity(day(6));

        let update = streak.record_activity(day(2));
        assert!(update.streak_reset());
        assert_eq!(streak.current_streak(), 1);
        assert_eq!(streak.last_activity_date(), day(2));
    }

    #[test]
    fn test_longest_streak_is_monotonic() {
        let mut streak = StreakRecord::new(day(0));
        let offsets = [1, 2, 3, 10, 11, 12, 13, 14, 30, 31];

        let mut previous = streak.longest_streak();
        for offset in offsets {
            streak.record_activity(day(offset));
            assert!(streak.longest_streak() >= previous);
            assert!(streak.longest_streak() >= streak.current_streak());
            previous = streak.longest_streak();
        }
    }

    #[test]
    fn test_imported_streak_unlocks_past_badges() {
        // A record already past the 7-day threshold but with no badge, as
        // an imported or hand-edited store could contain.
        let raw = r#"{
            "currentStreak": 10,
            "longestStreak": 10,
            "lastActivityDate": "2026-03-01",
            "streakStartDate": "2026-02-20",
            "unlockedBadges": []
        }"#;
        let mut streak: StreakRecord = serde_json::from_str(raw).unwrap();

        let update = streak.record_activity(day(1));
        assert_eq!(streak.current_streak(), 11);
        assert_eq!(update.unlocked().len(), 1);
        assert_eq!(update.unlocked()[0].id(), "seven-day");
    }

    #[test]
    fn test_next_badge_progression() {
        let mut streak = StreakRecord::new(day(0));
        assert_eq!(streak.next_badge().map(StreakBadge::id), Some("seven-day"));
        assert_eq!(streak.days_until_next_badge(), 6);

        for offset in 1..=6 {
            streak.record_activity(day(offset));
        }
        assert_eq!(streak.next_badge().map(StreakBadge::id), Some("thirty-day"));
        assert_eq!(streak.days_until_next_badge(), 23);
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let mut streak = StreakRecord::new(day(0));
        for offset in 1..=6 {
            streak.record_activity(day(offset));
        }

        let raw = serde_json::to_string(&streak).unwrap();
        let restored: StreakRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, streak);
        assert!(restored.has_badge("seven-day"));
    }
}
