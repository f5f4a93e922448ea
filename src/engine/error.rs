use thiserror::Error;

use crate::catalog::EpisodeId;
use crate::store::StoreError;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },
    #[error("the quiz for episode {0} has not been passed")]
    QuizNotPassed(EpisodeId),
}
