//! ToggleBlockList (0x3B) — Server → Client.
//!
//! Opens or closes the client's block menu.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleBlockList {
    /// `false` opens the menu, `true` closes it.
    pub close: bool,
}

impl Packet for ToggleBlockList {
    const OPCODE: u8 = super::id::TOGGLE_BLOCK_LIST;
}

impl ProtoEncode for ToggleBlockList {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.close as u8);
    }
}

impl ProtoDecode for ToggleBlockList {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, 1)?;
        Ok(Self {
            close: buf.get_u8() != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_packet, encode_packet};

    #[test]
    fn open_is_zero() {
        let bytes = encode_packet(&ToggleBlockList { close: false });
        assert_eq!(&bytes[..], &[0x3B, 0]);
    }

    #[test]
    fn decode_close() {
        let data: &[u8] = &[0x3B, 1];
        let pkt: ToggleBlockList = decode_packet(&mut &data[..]).unwrap();
        assert!(pkt.close);
    }
}
