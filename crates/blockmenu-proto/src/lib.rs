//! ClassiCube (Classic + CPE) packets used by the block-menu inventory.

pub mod codec;
pub mod error;
pub mod packets;
