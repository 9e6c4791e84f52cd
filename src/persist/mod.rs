//! Saving and loading inventories.

/// SQLite snapshot store.
pub mod sqlite;
/// Line-oriented seed files.
pub mod text;

use thiserror::Error;

use crate::service::{Inventory, InventoryConfig, InventoryError};

/// Failures raised by persistence backends.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Snapshot payload failed to encode or decode.
    #[error("snapshot payload error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Stored data was rejected by the inventory.
    #[error("inventory rejected stored data: {0}")]
    Inventory(#[from] InventoryError),
    /// Anything else.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Outcome of loading stored records into an inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records inserted.
    pub loaded: usize,
    /// Lines that could not be parsed.
    pub malformed: usize,
    /// Parsed records refused by the inventory (bad id, duplicate, bad field).
    pub rejected: usize,
}

impl LoadReport {
    /// Lines or records that did not make it in.
    pub fn skipped(&self) -> usize {
        self.malformed + self.rejected
    }
}

/// A place an inventory can be saved to and loaded back from.
pub trait SnapshotStore {
    /// Builds a fresh inventory from the stored state.
    fn load(&self, config: &InventoryConfig) -> PersistResult<(Inventory, LoadReport)>;
    /// Persists the current state of `inventory`.
    fn save(&mut self, inventory: &Inventory) -> PersistResult<()>;
}
