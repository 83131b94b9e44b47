//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("unexpected packet opcode: expected 0x{expected:02X}, got 0x{got:02X}")]
    UnexpectedOpcode { expected: u8, got: u8 },

    #[error("unknown packet opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("invalid {field} value: {value}")]
    InvalidEnum { field: &'static str, value: u8 },
}
