//! Recording `ServerApi` shared by the unit tests.

use std::collections::HashMap;

use blockmenu_plugin_api::{
    BlockId, EventKind, LogLevel, PermissionLevel, PluginBlockPos, PluginPlayer, Priority,
    ServerApi, BLOCK_AIR,
};
use blockmenu_proto::packets::id;
use bytes::Bytes;

use crate::service::InventoryService;
use crate::store::{InventoryStore, SqliteStore};

pub fn player(name: &str) -> PluginPlayer {
    PluginPlayer {
        name: name.into(),
        held_block: 1,
        ext_blocks: true,
        supports_hold: true,
        rank: PermissionLevel::Guest,
    }
}

pub fn service() -> InventoryService<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create_table().unwrap();
    InventoryService::new(store)
}

#[derive(Default)]
pub struct RecordingApi {
    pub players: HashMap<String, PluginPlayer>,
    pub world: HashMap<PluginBlockPos, BlockId>,
    pub messages: Vec<(String, String)>,
    pub packets: Vec<(String, Bytes)>,
    pub holds: Vec<(String, BlockId)>,
    pub commands: Vec<(String, String, PermissionLevel)>,
    pub subscriptions: Vec<(EventKind, Priority, String)>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, player: PluginPlayer) -> Self {
        self.players.insert(player.name.clone(), player);
        self
    }

    pub fn messages_to(&self, name: &str) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| to == name)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    pub fn count_opcode(&self, opcode: u8) -> usize {
        self.packets
            .iter()
            .filter(|(_, p)| p.first() == Some(&opcode))
            .count()
    }

    pub fn menu_packets(&self) -> usize {
        self.count_opcode(id::SET_INVENTORY_ORDER)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.packets.clear();
        self.holds.clear();
    }
}

impl ServerApi for RecordingApi {
    fn get_player(&self, name: &str) -> Option<PluginPlayer> {
        self.players.get(name).cloned()
    }

    fn send_message(&mut self, player_name: &str, message: &str) {
        self.messages
            .push((player_name.to_string(), message.to_string()));
    }

    fn send_packet(&mut self, player_name: &str, packet: Bytes) {
        self.packets.push((player_name.to_string(), packet));
    }

    fn hold_block(&mut self, player_name: &str, block: BlockId, _prevent_change: bool) -> bool {
        self.holds.push((player_name.to_string(), block));
        true
    }

    fn get_block(&self, position: PluginBlockPos) -> BlockId {
        self.world.get(&position).copied().unwrap_or(BLOCK_AIR)
    }

    fn log(&self, _level: LogLevel, _message: &str) {}

    fn register_command(
        &mut self,
        name: &str,
        help: &str,
        permission: PermissionLevel,
        _plugin_name: &str,
    ) {
        self.commands
            .push((name.to_string(), help.to_string(), permission));
    }

    fn unregister_command(&mut self, name: &str) {
        self.commands.retain(|(n, _, _)| n != name);
    }

    fn subscribe(&mut self, kind: EventKind, priority: Priority, plugin_name: &str) {
        self.subscriptions
            .push((kind, priority, plugin_name.to_string()));
    }

    fn unsubscribe(&mut self, kind: EventKind, plugin_name: &str) {
        self.subscriptions
            .retain(|(k, _, p)| !(*k == kind && p == plugin_name));
    }
}
