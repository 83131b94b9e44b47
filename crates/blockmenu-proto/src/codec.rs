//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtoError;

/// Block id as sent on the wire (one byte, or two with `ExtBlocks`).
pub type BlockId = u16;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// A packet with a fixed one-byte opcode.
pub trait Packet {
    const OPCODE: u8;
}

/// Encode a packet body prefixed with its opcode.
pub fn encode_packet<P: Packet + ProtoEncode>(packet: &P) -> Bytes {
    let mut buf = BytesMut::new();
    buf.put_u8(P::OPCODE);
    packet.proto_encode(&mut buf);
    buf.freeze()
}

/// Decode an opcode-prefixed packet, checking the opcode matches `P`.
pub fn decode_packet<P: Packet + ProtoDecode>(buf: &mut impl Buf) -> Result<P, ProtoError> {
    ensure_remaining(buf, 1)?;
    let got = buf.get_u8();
    if got != P::OPCODE {
        return Err(ProtoError::UnexpectedOpcode {
            expected: P::OPCODE,
            got,
        });
    }
    P::proto_decode(buf)
}

/// Write a block id: two bytes big-endian when the session negotiated
/// `ExtBlocks`, otherwise the low byte only.
pub fn write_block(buf: &mut impl BufMut, block: BlockId, ext_blocks: bool) {
    if ext_blocks {
        buf.put_u16(block);
    } else {
        buf.put_u8(block as u8);
    }
}

/// Read a block id written by [`write_block`].
pub fn read_block(buf: &mut impl Buf, ext_blocks: bool) -> Result<BlockId, ProtoError> {
    if ext_blocks {
        ensure_remaining(buf, 2)?;
        Ok(buf.get_u16())
    } else {
        ensure_remaining(buf, 1)?;
        Ok(buf.get_u8() as BlockId)
    }
}

pub(crate) fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}
