//! Inventory entry model.

use crate::item::ItemId;

/// First usable slot.
pub const MIN_SLOT: i32 = 1;
/// Last usable slot.
pub const MAX_SLOT: i32 = 30;
/// Column width of `PlayerName`.
pub const OWNER_MAX_LEN: usize = 20;
/// Column width of `Metadata`.
pub const METADATA_MAX_LEN: usize = 100;

/// One stack of a single item type in a player's inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub owner: String,
    pub slot: i32,
    pub item: ItemId,
    pub quantity: i32,
    /// Free-form; `level=<N>` is understood by [`parse_level`].
    pub metadata: Option<String>,
}

impl InventoryEntry {
    pub fn new(owner: impl Into<String>, slot: i32, item: ItemId, quantity: i32) -> Self {
        Self {
            owner: owner.into(),
            slot,
            item,
            quantity,
            metadata: None,
        }
    }

    /// Whether the slot is one the block menu displays.
    pub fn in_menu_range(&self) -> bool {
        (MIN_SLOT..=MAX_SLOT).contains(&self.slot)
    }

    pub fn level(&self) -> Option<i32> {
        self.metadata.as_deref().and_then(parse_level)
    }
}

/// Parse metadata of the exact form `level=<integer>`.
///
/// Anything else (other keys, extra `=`, non-numeric values) yields `None`.
pub fn parse_level(metadata: &str) -> Option<i32> {
    let mut parts = metadata.split('=');
    let (key, value) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || key != "level" {
        return None;
    }
    value.parse().ok()
}
