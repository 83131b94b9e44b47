//! Inventory operations.
//!
//! Every operation re-reads the store; nothing is cached between calls.
//! Mutations run under the owner's lock so concurrent clicks from one player
//! cannot lose updates.

use std::collections::HashSet;

use blockmenu_plugin_api::{BlockId, PluginPlayer, ServerApi, BLOCK_AIR};

use crate::config::InventoryConfig;
use crate::entry::{InventoryEntry, MAX_SLOT, METADATA_MAX_LEN, MIN_SLOT};
use crate::error::InventoryError;
use crate::item::ItemId;
use crate::locks::OwnerLocks;
use crate::menu::block_menu_packets;
use crate::store::InventoryStore;

/// Result of [`InventoryService::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Added onto an existing stack.
    Stacked { slot: i32, quantity: i32 },
    /// Started a new stack in the lowest free slot.
    Created { slot: i32, quantity: i32 },
    /// Every slot in 1..=30 is taken.
    Full,
    /// Quantity was zero or negative; nothing changed.
    InvalidQuantity,
}

impl AddOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, AddOutcome::Full | AddOutcome::InvalidQuantity)
    }
}

/// Result of [`InventoryService::remove_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Stack shrank but is still there.
    Decremented { slot: i32, quantity: i32 },
    /// Stack reached zero and its row was deleted.
    Emptied { slot: i32 },
    /// Stack holds fewer than requested; nothing changed.
    Insufficient { available: i32 },
    /// No stack of that item. The player is not told.
    NotFound,
    /// Quantity was zero or negative; nothing changed.
    InvalidQuantity,
}

impl RemoveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RemoveOutcome::Decremented { .. } | RemoveOutcome::Emptied { .. }
        )
    }
}

pub struct InventoryService<S> {
    store: S,
    locks: OwnerLocks,
    config: InventoryConfig,
}

impl<S: InventoryStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, InventoryConfig::default())
    }

    pub fn with_config(store: S, config: InventoryConfig) -> Self {
        Self {
            store,
            locks: OwnerLocks::new(),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InventoryConfig) {
        self.config = config;
    }

    /// Add `quantity` of `block` to the player's inventory.
    pub fn add_item(
        &self,
        player: &PluginPlayer,
        block: BlockId,
        quantity: i32,
        api: &mut dyn ServerApi,
    ) -> Result<AddOutcome, InventoryError> {
        if quantity <= 0 {
            return Ok(AddOutcome::InvalidQuantity);
        }
        self.locks
            .with_lock(&player.name, || self.add_locked(player, block, quantity, api))
    }

    fn add_locked(
        &self,
        player: &PluginPlayer,
        block: BlockId,
        quantity: i32,
        api: &mut dyn ServerApi,
    ) -> Result<AddOutcome, InventoryError> {
        let owner = player.name.as_str();
        let item = ItemId::from_raw(block);
        let entries = self.store.find_by_owner(owner)?;

        if let Some(entry) = entries.iter().find(|e| e.item == item) {
            let total = entry.quantity.saturating_add(quantity);
            self.store.update_quantity(owner, entry.slot, total)?;
            api.send_message(owner, &format!("&anew: {total}"));
            return Ok(AddOutcome::Stacked {
                slot: entry.slot,
                quantity: total,
            });
        }

        let used: HashSet<i32> = entries.iter().map(|e| e.slot).collect();
        let Some(slot) = (MIN_SLOT..=MAX_SLOT).find(|s| !used.contains(s)) else {
            api.send_message(owner, "&cYour inventory is full.");
            return Ok(AddOutcome::Full);
        };

        self.store
            .insert(&InventoryEntry::new(owner, slot, item, quantity))?;
        api.send_message(owner, &format!("&anew: {quantity}"));
        if self.config.refresh_menu_on_change {
            self.update_block_menu(player, false, api)?;
        }
        if self.config.hold_on_change {
            api.hold_block(owner, block, false);
        }
        Ok(AddOutcome::Created { slot, quantity })
    }

    /// Take `quantity` of `block` out of the player's inventory.
    pub fn remove_item(
        &self,
        player: &PluginPlayer,
        block: BlockId,
        quantity: i32,
        api: &mut dyn ServerApi,
    ) -> Result<RemoveOutcome, InventoryError> {
        if quantity <= 0 {
            return Ok(RemoveOutcome::InvalidQuantity);
        }
        self.locks
            .with_lock(&player.name, || self.remove_locked(player, block, quantity, api))
    }

    fn remove_locked(
        &self,
        player: &PluginPlayer,
        block: BlockId,
        quantity: i32,
        api: &mut dyn ServerApi,
    ) -> Result<RemoveOutcome, InventoryError> {
        let owner = player.name.as_str();
        let item = ItemId::from_raw(block);
        let entries = self.store.find_by_owner(owner)?;

        let Some(entry) = entries.iter().find(|e| e.item == item) else {
            return Ok(RemoveOutcome::NotFound);
        };

        if entry.quantity < quantity {
            api.send_message(
                owner,
                &format!("&cYou do not have enough of block ID {item} to remove."),
            );
            return Ok(RemoveOutcome::Insufficient {
                available: entry.quantity,
            });
        }

        let Some(remaining) = entry.quantity.checked_sub(quantity) else {
            return Ok(RemoveOutcome::InvalidQuantity);
        };
        if remaining > 0 {
            self.store.update_quantity(owner, entry.slot, remaining)?;
            api.send_message(owner, &format!("&cnew: {remaining}"));
            return Ok(RemoveOutcome::Decremented {
                slot: entry.slot,
                quantity: remaining,
            });
        }

        self.store.delete_slot(owner, entry.slot)?;
        api.send_message(owner, "&anew: 0");
        if self.config.refresh_menu_on_change {
            self.update_block_menu(player, false, api)?;
        }
        if self.config.hold_on_change {
            api.hold_block(owner, BLOCK_AIR, false);
        }
        Ok(RemoveOutcome::Emptied { slot: entry.slot })
    }

    /// Total quantity of `block` across all of the owner's stacks.
    pub fn get_item_quantity(&self, owner: &str, block: BlockId) -> Result<i32, InventoryError> {
        let entries = self
            .store
            .find_by_owner_and_item(owner, ItemId::from_raw(block))?;
        Ok(entries
            .iter()
            .fold(0i32, |total, e| total.saturating_add(e.quantity)))
    }

    pub fn has_item(&self, owner: &str, block: BlockId) -> Result<bool, InventoryError> {
        Ok(self.get_item_quantity(owner, block)? > 0)
    }

    /// Whether any stack of `block` carries `level=<N>` metadata with `N >= required`.
    pub fn has_item_with_level(
        &self,
        owner: &str,
        block: BlockId,
        required: i32,
    ) -> Result<bool, InventoryError> {
        let entries = self
            .store
            .find_by_owner_and_item(owner, ItemId::from_raw(block))?;
        Ok(entries
            .iter()
            .filter_map(InventoryEntry::level)
            .any(|level| level >= required))
    }

    /// Replace the metadata of the owner's stack of `block`.
    ///
    /// Text longer than the column is cut at 100 characters. Returns `false`
    /// when the owner has no such stack.
    pub fn set_item_metadata(
        &self,
        owner: &str,
        block: BlockId,
        metadata: Option<&str>,
    ) -> Result<bool, InventoryError> {
        let item = ItemId::from_raw(block);
        let metadata: Option<String> =
            metadata.map(|m| m.chars().take(METADATA_MAX_LEN).collect());
        self.locks.with_lock(owner, || {
            let entries = self.store.find_by_owner_and_item(owner, item)?;
            let Some(entry) = entries.first() else {
                return Ok(false);
            };
            self.store
                .update_metadata(owner, entry.slot, metadata.as_deref())?;
            Ok(true)
        })
    }

    /// Rebuild the player's block menu from the store, optionally opening it.
    ///
    /// Returns the number of packets sent.
    pub fn update_block_menu(
        &self,
        player: &PluginPlayer,
        open: bool,
        api: &mut dyn ServerApi,
    ) -> Result<usize, InventoryError> {
        let entries = self.store.find_by_owner(&player.name)?;
        let packets = block_menu_packets(&entries, player.ext_blocks, open);
        let sent = packets.len();
        for packet in packets {
            api.send_packet(&player.name, packet);
        }
        Ok(sent)
    }
}
