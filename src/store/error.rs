use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("json error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}
