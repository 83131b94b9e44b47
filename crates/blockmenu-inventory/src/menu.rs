//! Projection of stored entries onto the client block menu.
//!
//! The menu is rebuilt from scratch every time: all positions are cleared to
//! air, then each stored slot 1..=30 is placed at the matching position.

use blockmenu_plugin_api::BLOCK_AIR;
use blockmenu_proto::codec::encode_packet;
use blockmenu_proto::packets::set_inventory_order::MENU_POSITIONS;
use blockmenu_proto::packets::{SetInventoryOrder, ToggleBlockList};
use bytes::Bytes;

use crate::entry::InventoryEntry;

/// Encoded packets that make the menu show exactly `entries`.
///
/// Without `ExtBlocks` the order byte wraps above 255, as the client only
/// has 256 positions in that mode.
pub fn block_menu_packets(entries: &[InventoryEntry], ext_blocks: bool, open: bool) -> Vec<Bytes> {
    let mut packets = Vec::with_capacity(MENU_POSITIONS as usize + entries.len() + 1);

    for order in 0..MENU_POSITIONS {
        packets.push(encode_packet(&SetInventoryOrder {
            block: BLOCK_AIR,
            order,
            ext_blocks,
        }));
    }

    for entry in entries.iter().filter(|e| e.in_menu_range()) {
        packets.push(encode_packet(&SetInventoryOrder {
            block: entry.item.display_block(),
            order: entry.slot as u16,
            ext_blocks,
        }));
    }

    if open {
        packets.push(encode_packet(&ToggleBlockList { close: false }));
    }
    packets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;
    use blockmenu_proto::codec::decode_packet;
    use blockmenu_proto::packets::id;

    fn entry(slot: i32, raw: u16) -> InventoryEntry {
        InventoryEntry::new("Alice", slot, ItemId::from_raw(raw), 1)
    }

    #[test]
    fn empty_inventory_only_clears() {
        let packets = block_menu_packets(&[], true, false);
        assert_eq!(packets.len(), 768);
        assert!(packets
            .iter()
            .all(|p| p[0] == id::SET_INVENTORY_ORDER && p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn clear_pass_covers_every_position_once() {
        let packets = block_menu_packets(&[], true, false);
        for (i, packet) in packets.iter().enumerate() {
            let order = u16::from_be_bytes([packet[3], packet[4]]);
            assert_eq!(order as usize, i);
        }
    }

    #[test]
    fn overlays_in_range_entries_and_opens() {
        let entries = vec![entry(1, 49), entry(30, 100), entry(31, 2), entry(0, 3)];
        let packets = block_menu_packets(&entries, true, true);
        assert_eq!(packets.len(), 768 + 2 + 1);

        let first: SetInventoryOrder = {
            let mut buf = &packets[768][1..];
            SetInventoryOrder::decode_with(&mut buf, true).unwrap()
        };
        assert_eq!(first.block, 49);
        assert_eq!(first.order, 1);

        let second = SetInventoryOrder::decode_with(&mut &packets[769][1..], true).unwrap();
        assert_eq!(second.block, 100);
        assert_eq!(second.order, 30);

        let toggle: ToggleBlockList = decode_packet(&mut &packets[770][..]).unwrap();
        assert!(!toggle.close);
    }

    #[test]
    fn classic_width_packets_are_three_bytes() {
        let packets = block_menu_packets(&[entry(2, 5)], false, false);
        assert_eq!(packets.len(), 769);
        assert!(packets.iter().all(|p| p.len() == 3));
        assert_eq!(&packets[768][..], &[id::SET_INVENTORY_ORDER, 5, 2]);
    }
}
