//! Inventory errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,
}
