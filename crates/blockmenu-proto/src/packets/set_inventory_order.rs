//! SetInventoryOrder (0x2C) — Server → Client.
//!
//! Places a block at a position of the client's block menu. Sending air for
//! an order hides that position.

use bytes::{Buf, BufMut};

use crate::codec::{read_block, write_block, BlockId, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

/// Number of orderable positions in the client block menu.
pub const MENU_POSITIONS: u16 = 768;

/// Reorder one position of the block menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetInventoryOrder {
    /// Block to show.
    pub block: BlockId,
    /// Menu position the block is shown at.
    pub order: u16,
    /// Whether block ids are two bytes wide for this session.
    pub ext_blocks: bool,
}

impl Packet for SetInventoryOrder {
    const OPCODE: u8 = super::id::SET_INVENTORY_ORDER;
}

impl ProtoEncode for SetInventoryOrder {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_block(buf, self.block, self.ext_blocks);
        write_block(buf, self.order, self.ext_blocks);
    }
}

impl SetInventoryOrder {
    /// Decode a body; the block width is a session property, not on the wire.
    pub fn decode_with(buf: &mut impl Buf, ext_blocks: bool) -> Result<Self, ProtoError> {
        let block = read_block(buf, ext_blocks)?;
        let order = read_block(buf, ext_blocks)?;
        Ok(Self {
            block,
            order,
            ext_blocks,
        })
    }
}

impl ProtoDecode for SetInventoryOrder {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Self::decode_with(buf, false)
    }
}
