//! Auto-save functionality for board persistence.
//!
//! Collects dirty marks from the session and writes at most once per save
//! window, so a burst of edits becomes one write.

use crate::board::Board;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default save debounce in milliseconds.
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 2000;

/// Key for the most recently saved board, used for restore on launch.
pub const LAST_BOARD_KEY: &str = "__last_board__";

/// Manages automatic board persistence.
pub struct AutoSaveManager<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Minimum time between automatic saves.
    interval: Duration,
    /// Last save timestamp.
    last_save: Option<Instant>,
    /// Whether the board has unsaved changes.
    dirty: bool,
    /// Storage key of the board being edited.
    current_board_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS),
            last_save: None,
            dirty: false,
            current_board_id: None,
        }
    }

    /// Set the save debounce window.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Get the save debounce window.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Mark the board as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Check if the board has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the storage key to save under.
    pub fn set_board_id(&mut self, id: Option<String>) {
        self.current_board_id = id;
    }

    /// Get the current storage key.
    pub fn board_id(&self) -> Option<&str> {
        self.current_board_id.as_deref()
    }

    /// Check if enough time has passed for an auto-save.
    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }

        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true, // Never saved, should save
        }
    }

    /// Save the board if needed (dirty + window elapsed).
    /// Returns true if a save was performed.
    pub async fn maybe_save(&mut self, board: &Board) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }

        self.save(board).await?;
        Ok(true)
    }

    /// Force save the board immediately.
    pub async fn save(&mut self, board: &Board) -> StorageResult<()> {
        let key = self
            .current_board_id
            .clone()
            .unwrap_or_else(|| board.id.clone());

        self.storage.save_board(&key, board).await?;

        // Also save under the restore key for the next launch
        self.storage.save_board(LAST_BOARD_KEY, board).await?;

        self.last_save = Some(Instant::now());
        self.dirty = false;

        Ok(())
    }

    /// Load a board by key and adopt that key for future saves.
    pub async fn load(&mut self, key: &str) -> StorageResult<Board> {
        let board = self.storage.load_board(key).await?;
        self.current_board_id = Some(key.to_string());
        self.dirty = false;
        self.last_save = Some(Instant::now());
        Ok(board)
    }

    /// Try to restore the most recently saved board, adopting its id so
    /// later saves keep landing under the same key across relaunches.
    /// Returns None if nothing was ever saved.
    pub async fn load_last(&mut self) -> Option<Board> {
        match self.storage.load_board(LAST_BOARD_KEY).await {
            Ok(board) => {
                self.current_board_id = Some(board.id.clone());
                self.dirty = false;
                self.last_save = Some(Instant::now());
                Some(board)
            }
            Err(StorageError::NotFound(_)) => None,
            Err(e) => {
                log::warn!("failed to restore last board: {e}");
                None
            }
        }
    }

    /// Delete a stored board by key.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        self.storage.delete_board(key).await
    }

    /// List saved board keys.
    pub async fn list_boards(&self) -> StorageResult<Vec<String>> {
        let mut keys = self.storage.list_boards().await?;
        // Hide the special restore key
        keys.retain(|key| key != LAST_BOARD_KEY);
        Ok(keys)
    }

    /// Check if a board exists.
    pub async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.storage.exists(key).await
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create the default file-backed storage.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}
