//! PlayerClick (0x22) — Client → Server.
//!
//! Sent on every mouse press/release while the client has the `PlayerClick`
//! extension. Targets that are not a block use coordinates of `-1`.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

const BODY_LEN: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickFace {
    AwayX,
    TowardsX,
    AwayY,
    TowardsY,
    AwayZ,
    TowardsZ,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerClick {
    pub button: ClickButton,
    pub action: ClickAction,
    pub yaw: u16,
    pub pitch: u16,
    pub target_entity: u8,
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub face: ClickFace,
}

impl Packet for PlayerClick {
    const OPCODE: u8 = super::id::PLAYER_CLICK;
}

impl ClickButton {
    fn from_u8(value: u8) -> Result<Self, ProtoError> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            2 => Ok(Self::Middle),
            _ => Err(ProtoError::InvalidEnum {
                field: "button",
                value,
            }),
        }
    }
}

impl ClickAction {
    fn from_u8(value: u8) -> Result<Self, ProtoError> {
        match value {
            0 => Ok(Self::Pressed),
            1 => Ok(Self::Released),
            _ => Err(ProtoError::InvalidEnum {
                field: "action",
                value,
            }),
        }
    }
}

impl ClickFace {
    fn from_u8(value: u8) -> Result<Self, ProtoError> {
        Ok(match value {
            0 => Self::AwayX,
            1 => Self::TowardsX,
            2 => Self::AwayY,
            3 => Self::TowardsY,
            4 => Self::AwayZ,
            5 => Self::TowardsZ,
            6 => Self::None,
            _ => {
                return Err(ProtoError::InvalidEnum {
                    field: "face",
                    value,
                })
            }
        })
    }
}

impl ProtoDecode for PlayerClick {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        ensure_remaining(buf, BODY_LEN)?;
        let button = ClickButton::from_u8(buf.get_u8())?;
        let action = ClickAction::from_u8(buf.get_u8())?;
        let yaw = buf.get_u16();
        let pitch = buf.get_u16();
        let target_entity = buf.get_u8();
        let x = buf.get_u16();
        let y = buf.get_u16();
        let z = buf.get_u16();
        let face = ClickFace::from_u8(buf.get_u8())?;
        Ok(Self {
            button,
            action,
            yaw,
            pitch,
            target_entity,
            x,
            y,
            z,
            face,
        })
    }
}

// Clients send this; encoding is kept for test fixtures and proxies.
impl ProtoEncode for PlayerClick {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.button as u8);
        buf.put_u8(self.action as u8);
        buf.put_u16(self.yaw);
        buf.put_u16(self.pitch);
        buf.put_u8(self.target_entity);
        buf.put_u16(self.x);
        buf.put_u16(self.y);
        buf.put_u16(self.z);
        buf.put_u8(self.face as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_packet;

    #[test]
    fn decode_left_press() {
        let data: &[u8] = &[
            0x22, // opcode
            0, 0, // left, pressed
            0x40, 0x00, // yaw
            0x00, 0x10, // pitch
            0xFF, // no entity
            0x00, 0x05, 0x00, 0x20, 0x00, 0x07, // 5, 32, 7
            3,    // towards Y
        ];
        let pkt: PlayerClick = decode_packet(&mut &data[..]).unwrap();
        assert_eq!(pkt.button, ClickButton::Left);
        assert_eq!(pkt.action, ClickAction::Pressed);
        assert_eq!(pkt.yaw, 0x4000);
        assert_eq!(pkt.pitch, 0x10);
        assert_eq!((pkt.x, pkt.y, pkt.z), (5, 32, 7));
        assert_eq!(pkt.face, ClickFace::TowardsY);
    }

    #[test]
    fn decode_rejects_bad_button() {
        let data: &[u8] = &[9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            PlayerClick::proto_decode(&mut &data[..]),
            Err(ProtoError::InvalidEnum { field: "button", value: 9 })
        ));
    }

    #[test]
    fn decode_wrong_opcode() {
        let data: &[u8] = &[0x14, 0, 0];
        assert!(matches!(
            decode_packet::<PlayerClick>(&mut &data[..]),
            Err(ProtoError::UnexpectedOpcode { expected: 0x22, got: 0x14 })
        ));
    }

    #[test]
    fn decode_truncated() {
        let data: &[u8] = &[0, 0, 0];
        assert!(PlayerClick::proto_decode(&mut &data[..]).is_err());
    }
}
