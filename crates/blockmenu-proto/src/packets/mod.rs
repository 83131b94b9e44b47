//! CPE packet definitions used by the inventory menu.

pub mod hold_this;
pub mod player_click;
pub mod set_inventory_order;
pub mod toggle_block_list;

pub use hold_this::HoldThis;
pub use player_click::{ClickAction, ClickButton, ClickFace, PlayerClick};
pub use set_inventory_order::SetInventoryOrder;
pub use toggle_block_list::ToggleBlockList;

/// Packet opcodes.
pub mod id {
    pub const HOLD_THIS: u8 = 0x14;
    pub const PLAYER_CLICK: u8 = 0x22;
    pub const SET_INVENTORY_ORDER: u8 = 0x2C;
    pub const TOGGLE_BLOCK_LIST: u8 = 0x3B;
}
