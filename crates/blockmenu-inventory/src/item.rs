//! Mapping between raw block ids and the ids stored in the inventory table.

use std::fmt;

use blockmenu_plugin_api::{BlockId, BLOCK_AIR};

/// Raw ids at or above this are stored shifted down by [`EXTENDED_OFFSET`].
pub const EXTENDED_THRESHOLD: BlockId = 66;
pub const EXTENDED_OFFSET: i32 = 256;

/// Item id in its stored form.
///
/// Raw ids below 66 are stored as-is; ids from 66 up are stored minus 256,
/// so the classic custom range 66..=255 becomes negative and the extended
/// range from 256 starts again at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(i32);

impl ItemId {
    pub fn from_raw(raw: BlockId) -> Self {
        let id = raw as i32;
        if raw >= EXTENDED_THRESHOLD {
            Self(id - EXTENDED_OFFSET)
        } else {
            Self(id)
        }
    }

    pub fn from_stored(stored: i32) -> Self {
        Self(stored)
    }

    pub fn stored(self) -> i32 {
        self.0
    }

    /// Block shown in the menu for this item.
    ///
    /// Negative ids come from the 66..=255 range and map back exactly;
    /// everything else is shown as stored. Out-of-range values show as air.
    pub fn display_block(self) -> BlockId {
        let id = if self.0 < 0 {
            self.0 + EXTENDED_OFFSET
        } else {
            self.0
        };
        BlockId::try_from(id).unwrap_or(BLOCK_AIR)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
