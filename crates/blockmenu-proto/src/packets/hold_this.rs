//! HoldThis (0x14) — Server → Client.
//!
//! Forces the block the player holds, optionally locking the selection.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, read_block, write_block, BlockId, Packet, ProtoEncode};
use crate::error::ProtoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldThis {
    pub block: BlockId,
    /// Prevents the player from changing the held block until released.
    pub prevent_change: bool,
    pub ext_blocks: bool,
}

impl Packet for HoldThis {
    const OPCODE: u8 = super::id::HOLD_THIS;
}

impl ProtoEncode for HoldThis {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_block(buf, self.block, self.ext_blocks);
        buf.put_u8(self.prevent_change as u8);
    }
}

impl HoldThis {
    pub fn decode_with(buf: &mut impl Buf, ext_blocks: bool) -> Result<Self, ProtoError> {
        let block = read_block(buf, ext_blocks)?;
        ensure_remaining(buf, 1)?;
        Ok(Self {
            block,
            prevent_change: buf.get_u8() != 0,
            ext_blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_packet;

    #[test]
    fn encode_hold_air() {
        let bytes = encode_packet(&HoldThis {
            block: 0,
            prevent_change: false,
            ext_blocks: false,
        });
        assert_eq!(&bytes[..], &[0x14, 0, 0]);
    }

    #[test]
    fn encode_hold_extended_locked() {
        let bytes = encode_packet(&HoldThis {
            block: 0x0101,
            prevent_change: true,
            ext_blocks: true,
        });
        assert_eq!(&bytes[..], &[0x14, 0x01, 0x01, 1]);
    }

    #[test]
    fn decode_needs_flag_byte() {
        let mut buf = &[0x00u8, 0x2A][..];
        assert!(matches!(
            HoldThis::decode_with(&mut buf, true),
            Err(ProtoError::BufferTooShort { .. })
        ));

        let mut buf = &[0x2Au8, 1][..];
        let hold = HoldThis::decode_with(&mut buf, false).unwrap();
        assert_eq!(hold.block, 42);
        assert!(hold.prevent_change);
    }
}
