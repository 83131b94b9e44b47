//! Block inventory plugin.
//!
//! Stores one row per (player, slot) stack, updates it as players break and
//! place blocks, and mirrors the rows into the client's block menu.

pub mod config;
pub mod entry;
pub mod error;
pub mod item;
pub mod locks;
pub mod menu;
pub mod plugin;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::InventoryConfig;
pub use entry::{parse_level, InventoryEntry, MAX_SLOT, MIN_SLOT};
pub use error::InventoryError;
pub use item::ItemId;
pub use plugin::InventoryPlugin;
pub use service::{AddOutcome, InventoryService, RemoveOutcome};
pub use store::{InventoryStore, SqliteStore};
