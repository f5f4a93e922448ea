use thiserror::Error;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("json error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("episode {0} not found in catalog")]
    EpisodeNotFound(u32),
}
