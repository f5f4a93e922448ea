//! Read-only episode content, supplied as a static JSON document.
//!
//! The catalog is a trusted collaborator: beyond JSON shape it is not
//! validated here, and the engine never mutates it.

use std::path::Path;

use serde::Deserialize;

mod error;
pub use error::{CatalogError, CatalogResult};

pub type EpisodeId = u32;

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    episodes: Vec<Episode>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CatalogResult<Self> {
        let catalog: Self = serde_json::from_str(raw)?;
        Ok(catalog)
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Look up an episode by its catalog number (the learner-facing index,
    /// distinct from the id the progress records key on).
    pub fn by_number(&self, number: u32) -> CatalogResult<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.number == number)
            .ok_or(CatalogError::EpisodeNotFound(number))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    id: EpisodeId,
    number: u32,
    title: String,
    #[serde(default)]
    concept: String,
    #[serde(default)]
    pages: Vec<EpisodePage>,
    #[serde(default)]
    quiz: Vec<QuizQuestion>,
    #[serde(default)]
    challenge: String,
    #[serde(default)]
    points: PointValues,
}

impl Episode {
    pub fn id(&self) -> EpisodeId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn pages(&self) -> &[EpisodePage] {
        &self.pages
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    pub fn points(&self) -> &PointValues {
        &self.points
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodePage {
    number: u32,
    title: String,
    content: String,
}

impl EpisodePage {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    question: String,
    options: Vec<String>,
    correct: usize,
    #[serde(default)]
    explanation: String,
}

impl QuizQuestion {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Display-only point values carried by the content; the amounts actually
/// awarded come from the configured rules.
#[derive(Debug, Clone, Deserialize)]
pub struct PointValues {
    quiz: u32,
    perfect: u32,
    challenge: u32,
}

impl PointValues {
    pub fn quiz(&self) -> u32 {
        self.quiz
    }

    pub fn perfect(&self) -> u32 {
        self.perfect
    }

    pub fn challenge(&self) -> u32 {
        self.challenge
    }
}

impl Default for PointValues {
    fn default() -> Self {
        Self {
            quiz: 20,
            perfect: 25,
            challenge: 50,
        }
    }
}
