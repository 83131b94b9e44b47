use serde::{Deserialize, Serialize};

/// Plugin settings, stored as `plugins/<name>/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Re-send the block menu when a stack is created or emptied.
    #[serde(default = "default_true")]
    pub refresh_menu_on_change: bool,
    /// Make the player hold a newly created stack, and air once a stack is emptied.
    #[serde(default = "default_true")]
    pub hold_on_change: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            refresh_menu_on_change: true,
            hold_on_change: true,
        }
    }
}
