mod error;
pub use error::{StoreError, StoreResult};

mod file;
pub use file::FileStore;

mod memory;
pub use memory::MemoryStore;

/// Key holding the learner's progress record.
pub static PROGRESS_KEY: &str = "alfredProgress";
/// Key holding the learner's streak record.
pub static STREAK_KEY: &str = "alfredStreak";

/// Flat key-value persistence for singleton state records.
///
/// Values are opaque strings (JSON documents in practice). A whole value is
/// written per `set`; concurrent writers are last-writer-wins.
pub trait StateStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn clear(&mut self, key: &str) -> StoreResult<()>;
}
