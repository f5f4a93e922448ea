use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use alfred::catalog::Catalog;
use alfred::config::Rules;
use alfred::engine::{ChallengeOutcome, QuizOutcome, Tracker};
use alfred::store::{MemoryStore, StateStore};

/// Three-episode catalog with five-question quizzes. The correct answer
/// sequence of every quiz is `[0, 1, 2, 3, 0]`.
pub static CATALOG_JSON: &str = r#"{
    "episodes": [
        {
            "id": 1,
            "number": 1,
            "title": "El Secreto",
            "concept": "Introducción",
            "quiz": [
                { "question": "q1", "options": ["a", "b", "c", "d"], "correct": 0 },
                { "question": "q2", "options": ["a", "b", "c", "d"], "correct": 1 },
                { "question": "q3", "options": ["a", "b", "c", "d"], "correct": 2 },
                { "question": "q4", "options": ["a", "b", "c", "d"], "correct": 3 },
                { "question": "q5", "options": ["a", "b", "c", "d"], "correct": 0 }
            ],
            "challenge": "Cuéntaselo a tu mamá."
        },
        {
            "id": 2,
            "number": 2,
            "title": "El Código",
            "concept": "Disciplina",
            "quiz": [
                { "question": "q1", "options": ["a", "b", "c", "d"], "correct": 0 },
                { "question": "q2", "options": ["a", "b", "c", "d"], "correct": 1 },
                { "question": "q3", "options": ["a", "b", "c", "d"], "correct": 2 },
                { "question": "q4", "options": ["a", "b", "c", "d"], "correct": 3 },
                { "question": "q5", "options": ["a", "b", "c", "d"], "correct": 0 }
            ],
            "challenge": "Ayuda en casa hoy."
        },
        {
            "id": 3,
            "number": 3,
            "title": "Tu Mamá es Sagrada",
            "concept": "Respeto",
            "quiz": [
                { "question": "q1", "options": ["a", "b", "c", "d"], "correct": 0 },
                { "question": "q2", "options": ["a", "b", "c", "d"], "correct": 1 },
                { "question": "q3", "options": ["a", "b", "c", "d"], "correct": 2 },
                { "question": "q4", "options": ["a", "b", "c", "d"], "correct": 3 },
                { "question": "q5", "options": ["a", "b", "c", "d"], "correct": 0 }
            ],
            "challenge": "Da las gracias tres veces."
        }
    ]
}"#;

pub const ALL_CORRECT: [usize; 5] = [0, 1, 2, 3, 0];
pub const FOUR_CORRECT: [usize; 5] = [0, 1, 2, 3, 1];

pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("fixture catalog must parse")
}

/// A learner's multi-day journey through the app, over an in-memory store.
/// Days are offsets from a fixed start date so tests are deterministic.
pub struct Journey {
    pub tracker: Tracker<MemoryStore>,
    pub catalog: Catalog,
    rules: Rules,
}

impl Journey {
    pub fn new(rules: Rules) -> Self {
        Self::over(MemoryStore::new(), rules)
    }

    pub fn over(store: MemoryStore, rules: Rules) -> Self {
        let tracker =
            Tracker::open(store, rules.clone(), at_day(0)).expect("tracker must open");
        Self {
            tracker,
            catalog: catalog(),
            rules,
        }
    }

    /// Rebuild the tracker from the same store, as a fresh session would.
    pub fn reopen(self) -> Self {
        let rules = self.rules.clone();
        let store = self.tracker.into_store();
        Self::over(store, rules)
    }

    pub fn visit(&mut self, day: i64) {
        self.tracker
            .record_activity(date(day))
            .expect("activity must record");
    }

    pub fn quiz(&mut self, day: i64, episode: u32, answers: &[usize]) -> QuizOutcome {
        let episode = self
            .catalog
            .by_number(episode)
            .expect("episode must exist")
            .clone();
        self.tracker
            .submit_quiz(&episode, answers, at_day(day))
            .expect("quiz must submit")
    }

    pub fn challenge(&mut self, day: i64, episode: u32) -> ChallengeOutcome {
        let episode = self
            .catalog
            .by_number(episode)
            .expect("episode must exist")
            .clone();
        self.tracker
            .complete_challenge(&episode, at_day(day))
            .expect("challenge must complete")
    }

    /// Consume the journey and hand back the underlying store.
    pub fn into_store(self) -> MemoryStore {
        self.tracker.into_store()
    }
}

pub fn date(day_offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date") + Duration::days(day_offset)
}

pub fn at_day(day_offset: i64) -> DateTime<Utc> {
    Utc.from_utc_datetime(
        &date(day_offset)
            .and_hms_opt(10, 0, 0)
            .expect("valid time"),
    )
}

/// Seed a store value directly, simulating pre-existing or corrupt state.
pub fn seeded_store(key: &str, value: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(key, value).expect("seed must write");
    store
}
