//! Storage abstraction for board persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{AutoSaveManager, DEFAULT_SAVE_DEBOUNCE_MS, LAST_BOARD_KEY};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use autosave::create_default_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::board::Board;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Board not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for board storage backends.
///
/// The unit of persistence is a whole board, identity included, so a
/// loaded board keeps the id it was saved with no matter which key it
/// was stored under.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a board.
    fn save_board(&self, key: &str, board: &Board) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a board.
    fn load_board(&self, key: &str) -> BoxFuture<'_, StorageResult<Board>>;

    /// Delete a stored board.
    fn delete_board(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored board keys.
    fn list_boards(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a board exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for board storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a board.
    fn save_board(&self, key: &str, board: &Board) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a board.
    fn load_board(&self, key: &str) -> BoxFuture<'_, StorageResult<Board>>;

    /// Delete a stored board.
    fn delete_board(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored board keys.
    fn list_boards(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a board exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
