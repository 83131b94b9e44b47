//! Console host: simulated sessions, packet routing and console commands.
//!
//! Every outbound packet a plugin produces is replayed through a
//! [`SimulatedClient`] so the block menu a real client would show can be
//! inspected from the console.

use std::collections::{BTreeMap, HashMap};

use blockmenu_plugin_api::{
    BlockId, EventResult, MouseAction, MouseButton, PermissionLevel, PluginBlockPos, PluginEvent,
    PluginPlayer, TargetBlockFace, BLOCK_AIR,
};
use blockmenu_proto::codec::{decode_packet, encode_packet, ProtoDecode};
use blockmenu_proto::error::ProtoError;
use blockmenu_proto::packets::{
    id, ClickAction, ClickButton, ClickFace, HoldThis, PlayerClick, SetInventoryOrder,
    ToggleBlockList,
};
use bytes::{Buf, Bytes};
use tracing::{debug, info, warn};

use crate::config::PlayersSection;
use crate::plugin_manager::{CommandDispatch, PendingAction, PluginManager, ServerSnapshot};
use crate::world::World;

/// Sender name used for commands typed at the console.
pub const CONSOLE: &str = "Console";

/// Client-side state rebuilt from the packets a session received.
#[derive(Debug, Default)]
pub struct SimulatedClient {
    pub chat: Vec<String>,
    /// Menu order → block, air positions omitted.
    pub menu: BTreeMap<u16, BlockId>,
    pub menu_open: bool,
    pub held: BlockId,
    pub held_locked: bool,
    pub packets_received: usize,
}

impl SimulatedClient {
    /// Apply one opcode-prefixed packet.
    pub fn receive(&mut self, packet: &Bytes, ext_blocks: bool) -> Result<(), ProtoError> {
        let mut buf = packet.clone();
        if !buf.has_remaining() {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        }
        self.packets_received += 1;
        match buf.get_u8() {
            id::SET_INVENTORY_ORDER => {
                let pkt = SetInventoryOrder::decode_with(&mut buf, ext_blocks)?;
                if pkt.block == BLOCK_AIR {
                    self.menu.remove(&pkt.order);
                } else {
                    self.menu.insert(pkt.order, pkt.block);
                }
            }
            id::TOGGLE_BLOCK_LIST => {
                let pkt = ToggleBlockList::proto_decode(&mut buf)?;
                self.menu_open = !pkt.close;
            }
            id::HOLD_THIS => {
                let pkt = HoldThis::decode_with(&mut buf, ext_blocks)?;
                self.held = pkt.block;
                self.held_locked = pkt.prevent_change;
            }
            other => return Err(ProtoError::UnknownOpcode(other)),
        }
        Ok(())
    }
}

pub struct Host {
    world: World,
    players: HashMap<String, PluginPlayer>,
    clients: HashMap<String, SimulatedClient>,
    plugin_manager: PluginManager,
    defaults: PlayersSection,
    running: bool,
}

impl Host {
    pub fn new(world: World, plugin_manager: PluginManager, defaults: PlayersSection) -> Self {
        Self {
            world,
            players: HashMap::new(),
            clients: HashMap::new(),
            plugin_manager,
            defaults,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn player(&self, name: &str) -> Option<&PluginPlayer> {
        self.players.get(name)
    }

    pub fn client(&self, name: &str) -> Option<&SimulatedClient> {
        self.clients.get(name)
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Enable every registered plugin and apply what they asked for.
    pub fn enable_plugins(&mut self) {
        let snapshot = ServerSnapshot {
            players: &self.players,
            world: &self.world,
        };
        let actions = self.plugin_manager.enable_all(&snapshot);
        self.apply_actions(actions);
    }

    pub fn shutdown(&mut self) {
        let snapshot = ServerSnapshot {
            players: &self.players,
            world: &self.world,
        };
        let actions = self.plugin_manager.disable_all(&snapshot);
        self.apply_actions(actions);
        self.running = false;
    }

    /// Add a simulated session. Returns `false` if the name is taken.
    pub fn join(&mut self, name: &str, rank: Option<PermissionLevel>) -> bool {
        if self.players.contains_key(name) {
            return false;
        }
        let player = PluginPlayer {
            name: name.to_string(),
            held_block: BLOCK_AIR,
            ext_blocks: self.defaults.ext_blocks,
            supports_hold: self.defaults.supports_hold,
            rank: rank.unwrap_or(self.defaults.default_rank),
        };
        info!("{name} joined ({:?})", player.rank);
        self.players.insert(name.to_string(), player);
        self.clients.insert(name.to_string(), SimulatedClient::default());
        true
    }

    pub fn quit(&mut self, name: &str) -> bool {
        self.clients.remove(name);
        let removed = self.players.remove(name).is_some();
        if removed {
            info!("{name} left");
        }
        removed
    }

    /// Client-side block selection; not a server-forced hold.
    pub fn select_block(&mut self, name: &str, block: BlockId) -> bool {
        match self.players.get_mut(name) {
            Some(player) => {
                player.held_block = block;
                if let Some(client) = self.clients.get_mut(name) {
                    client.held = block;
                }
                true
            }
            None => false,
        }
    }

    /// Handle a raw packet from `name`'s client.
    pub fn handle_packet(&mut self, name: &str, packet: Bytes) -> Result<(), ProtoError> {
        let Some(opcode) = packet.first().copied() else {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        };
        match opcode {
            id::PLAYER_CLICK => {
                let mut buf = packet;
                let click: PlayerClick = decode_packet(&mut buf)?;
                self.handle_player_click(name, click);
                Ok(())
            }
            other => Err(ProtoError::UnknownOpcode(other)),
        }
    }

    fn handle_player_click(&mut self, name: &str, click: PlayerClick) {
        let Some(player) = self.players.get(name).cloned() else {
            warn!("Click from unknown session {name}");
            return;
        };
        let event = PluginEvent::PlayerClick {
            player,
            button: match click.button {
                ClickButton::Left => MouseButton::Left,
                ClickButton::Right => MouseButton::Right,
                ClickButton::Middle => MouseButton::Middle,
            },
            action: match click.action {
                ClickAction::Pressed => MouseAction::Pressed,
                ClickAction::Released => MouseAction::Released,
            },
            yaw: click.yaw,
            pitch: click.pitch,
            target_entity: click.target_entity,
            position: PluginBlockPos {
                x: click.x,
                y: click.y,
                z: click.z,
            },
            face: match click.face {
                ClickFace::AwayX => TargetBlockFace::AwayX,
                ClickFace::TowardsX => TargetBlockFace::TowardsX,
                ClickFace::AwayY => TargetBlockFace::AwayY,
                ClickFace::TowardsY => TargetBlockFace::TowardsY,
                ClickFace::AwayZ => TargetBlockFace::AwayZ,
                ClickFace::TowardsZ => TargetBlockFace::TowardsZ,
                ClickFace::None => TargetBlockFace::None,
            },
        };
        let snapshot = ServerSnapshot {
            players: &self.players,
            world: &self.world,
        };
        let (result, actions) = self.plugin_manager.dispatch(&event, &snapshot);
        self.apply_actions(actions);
        if result == EventResult::Cancelled {
            debug!("Click from {name} cancelled by a plugin");
        }
    }

    /// Run a chat command (`/name args...`) for a session or the console.
    /// Returns text meant for the console.
    pub fn run_command(&mut self, sender: &str, line: &str) -> Option<String> {
        let command_str = line.strip_prefix('/').unwrap_or(line);
        let mut parts = command_str.split_whitespace();
        let cmd_name = parts.next()?;
        let args: Vec<String> = parts.map(String::from).collect();

        let rank = if sender == CONSOLE {
            PermissionLevel::Owner
        } else {
            self.players.get(sender)?.rank
        };
        info!("{sender} issued command: /{command_str}");

        let snapshot = ServerSnapshot {
            players: &self.players,
            world: &self.world,
        };
        let reply = match self
            .plugin_manager
            .handle_command(cmd_name, &args, sender, rank, &snapshot)
        {
            CommandDispatch::Unknown => Some(format!("&cUnknown command \"{cmd_name}\".")),
            CommandDispatch::Denied { required } => Some(format!(
                "&cOnly {required:?}+ can use /{cmd_name}."
            )),
            CommandDispatch::Handled { response, actions } => {
                self.apply_actions(actions);
                response
            }
        };

        let reply = reply?;
        if sender == CONSOLE {
            Some(reply)
        } else {
            self.deliver_message(sender, reply);
            None
        }
    }

    /// Execute external side effects requested by plugins.
    pub fn apply_actions(&mut self, actions: Vec<PendingAction>) {
        for action in actions {
            match action {
                PendingAction::SendMessage {
                    player_name,
                    message,
                } => self.deliver_message(&player_name, message),
                PendingAction::SendPacket {
                    player_name,
                    packet,
                } => self.deliver_packet(&player_name, packet),
                PendingAction::HoldBlock {
                    player_name,
                    block,
                    prevent_change,
                } => {
                    let Some(player) = self.players.get_mut(&player_name) else {
                        continue;
                    };
                    player.held_block = block;
                    let packet = encode_packet(&HoldThis {
                        block,
                        prevent_change,
                        ext_blocks: player.ext_blocks,
                    });
                    self.deliver_packet(&player_name, packet);
                }
                other => debug!("Ignoring host action {other:?}"),
            }
        }
    }

    fn deliver_message(&mut self, name: &str, message: String) {
        match self.clients.get_mut(name) {
            Some(client) => {
                info!("[chat -> {name}] {message}");
                client.chat.push(message);
            }
            None => debug!("Dropping message for offline {name}"),
        }
    }

    fn deliver_packet(&mut self, name: &str, packet: Bytes) {
        let ext_blocks = self.players.get(name).is_some_and(|p| p.ext_blocks);
        let Some(client) = self.clients.get_mut(name) else {
            debug!("Dropping packet for offline {name}");
            return;
        };
        if let Err(e) = client.receive(&packet, ext_blocks) {
            warn!("{name} could not decode packet: {e}");
        }
    }

    /// Handle one line typed at the console. Returns the text to print.
    pub fn handle_console_command(&mut self, line: &str) -> String {
        let line = line.trim();
        if line.starts_with('/') {
            return self.run_command(CONSOLE, line).unwrap_or_default();
        }
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return String::new();
        };
        let args: Vec<&str> = parts.collect();

        match cmd {
            "help" => self.console_help(),
            "stop" => {
                info!("Stopping server...");
                self.shutdown();
                "Server stopped.".into()
            }
            "plugins" => format!("Plugins: {}", self.plugin_manager.plugin_names().join(", ")),
            "players" => {
                let mut names: Vec<_> = self.players.keys().cloned().collect();
                names.sort();
                format!("Online ({}): {}", names.len(), names.join(", "))
            }
            "join" => match args.as_slice() {
                [name] => self.console_join(name, None),
                [name, rank] => match parse_rank(rank) {
                    Some(rank) => self.console_join(name, Some(rank)),
                    None => format!("Unknown rank: {rank}"),
                },
                _ => "Usage: join <name> [rank]".into(),
            },
            "quit" => match args.as_slice() {
                [name] if self.quit(name) => format!("{name} left."),
                [name] => format!("{name} is not online."),
                _ => "Usage: quit <name>".into(),
            },
            "select" => match args.as_slice() {
                [name, block] => match block.parse::<BlockId>() {
                    Ok(block) if self.select_block(name, block) => {
                        format!("{name} now holds block {block}.")
                    }
                    Ok(_) => format!("{name} is not online."),
                    Err(_) => format!("Invalid block id: {block}"),
                },
                _ => "Usage: select <name> <block>".into(),
            },
            "setblock" => match parse_numbers::<u16>(&args).as_deref() {
                Some(&[x, y, z, block]) => {
                    if self.world.set_block(PluginBlockPos { x, y, z }, block) {
                        format!("Set ({x}, {y}, {z}) to {block}.")
                    } else {
                        "Position is outside the world.".into()
                    }
                }
                _ => "Usage: setblock <x> <y> <z> <block>".into(),
            },
            "getblock" => match parse_numbers::<u16>(&args).as_deref() {
                Some(&[x, y, z]) => {
                    let block = self.world.get_block(PluginBlockPos { x, y, z });
                    format!("Block at ({x}, {y}, {z}): {block}")
                }
                _ => "Usage: getblock <x> <y> <z>".into(),
            },
            "click" => self.console_click(&args),
            "as" => match args.split_first() {
                Some((name, rest)) if !rest.is_empty() => {
                    if !self.players.contains_key(*name) {
                        return format!("{name} is not online.");
                    }
                    self.run_command(name, &rest.join(" ")).unwrap_or_default()
                }
                _ => "Usage: as <name> /<command> [args]".into(),
            },
            "chat" => match args.as_slice() {
                [name] => match self.clients.get(*name) {
                    Some(client) if client.chat.is_empty() => format!("No messages for {name}."),
                    Some(client) => client.chat.join("\n"),
                    None => format!("{name} is not online."),
                },
                _ => "Usage: chat <name>".into(),
            },
            "menu" => match args.as_slice() {
                [name] => match self.clients.get(*name) {
                    Some(client) => describe_menu(client),
                    None => format!("{name} is not online."),
                },
                _ => "Usage: menu <name>".into(),
            },
            _ => format!("Unknown console command: {cmd}. Type \"help\"."),
        }
    }

    fn console_join(&mut self, name: &str, rank: Option<PermissionLevel>) -> String {
        if self.join(name, rank) {
            format!("{name} joined.")
        } else {
            format!("{name} is already online.")
        }
    }

    fn console_click(&mut self, args: &[&str]) -> String {
        const USAGE: &str = "Usage: click <name> <left|right|middle> <x> <y> <z> [released]";
        let (name, button, coords, released) = match args {
            [name, button, x, y, z] => (*name, *button, [*x, *y, *z], false),
            [name, button, x, y, z, "released"] => (*name, *button, [*x, *y, *z], true),
            _ => return USAGE.into(),
        };
        let button = match button {
            "left" => ClickButton::Left,
            "right" => ClickButton::Right,
            "middle" => ClickButton::Middle,
            _ => return USAGE.into(),
        };
        let Some(&[x, y, z]) = parse_numbers::<u16>(&coords).as_deref() else {
            return USAGE.into();
        };
        if !self.players.contains_key(name) {
            return format!("{name} is not online.");
        }

        let packet = encode_packet(&PlayerClick {
            button,
            action: if released {
                ClickAction::Released
            } else {
                ClickAction::Pressed
            },
            yaw: 0,
            pitch: 0,
            target_entity: 0xFF,
            x,
            y,
            z,
            face: ClickFace::TowardsY,
        });
        match self.handle_packet(name, packet) {
            Ok(()) => String::new(),
            Err(e) => format!("Bad click packet: {e}"),
        }
    }

    fn console_help(&self) -> String {
        let mut lines = vec![
            "Console commands:".to_string(),
            "  join <name> [rank]           - add a simulated player".into(),
            "  quit <name>                  - remove a player".into(),
            "  select <name> <block>        - change the block a player holds".into(),
            "  setblock <x> <y> <z> <block> - edit the world".into(),
            "  getblock <x> <y> <z>         - read the world".into(),
            "  click <name> <button> <x> <y> <z> [released]".into(),
            "  as <name> /<command> [args]  - run a command as a player".into(),
            "  chat <name> | menu <name>    - show what a player's client shows".into(),
            "  players | plugins | stop".into(),
            "Plugin commands:".into(),
        ];
        for command in self.plugin_manager.commands() {
            lines.push(format!("  {} ({:?}+)", command.help, command.permission));
        }
        lines.join("\n")
    }
}

fn parse_rank(text: &str) -> Option<PermissionLevel> {
    serde_json::from_value(serde_json::Value::String(text.to_lowercase())).ok()
}

fn parse_numbers<T: std::str::FromStr>(args: &[&str]) -> Option<Vec<T>> {
    args.iter().map(|a| a.parse().ok()).collect()
}

fn describe_menu(client: &SimulatedClient) -> String {
    let state = if client.menu_open { "open" } else { "closed" };
    if client.menu.is_empty() {
        return format!("Menu ({state}): empty");
    }
    let entries: Vec<String> = client
        .menu
        .iter()
        .map(|(order, block)| format!("{order}:{block}"))
        .collect();
    format!("Menu ({state}): {}", entries.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmenu_inventory::plugin::{COMMAND_NAME, PLUGIN_NAME};
    use blockmenu_inventory::{InventoryPlugin, SqliteStore};
    use blockmenu_proto::packets::set_inventory_order::MENU_POSITIONS;

    const STONE: BlockId = 1;
    const GRASS: BlockId = 2;
    const GOLD: BlockId = 41;
    const EXT: BlockId = 300;

    fn host() -> Host {
        let mut manager = PluginManager::new();
        manager.register(Box::new(InventoryPlugin::new(
            SqliteStore::open_in_memory().unwrap(),
        )));
        let mut host = Host::new(World::flat(8, 8, 8), manager, PlayersSection::default());
        host.enable_plugins();
        host
    }

    fn break_block(host: &mut Host, name: &str, x: u16, y: u16, z: u16) {
        assert_eq!(
            host.handle_console_command(&format!("click {name} left {x} {y} {z}")),
            ""
        );
    }

    #[test]
    fn plugin_is_enabled_and_command_registered() {
        let host = host();
        assert_eq!(host.plugin_manager.plugin_names(), vec![PLUGIN_NAME.to_string()]);
        assert!(host.plugin_manager.command("inventory").is_some());
    }

    #[test]
    fn join_and_quit() {
        let mut host = host();
        assert!(host.join("Alice", None));
        assert!(!host.join("Alice", None));
        assert_eq!(host.player("Alice").unwrap().rank, PermissionLevel::Guest);
        assert!(host.quit("Alice"));
        assert!(!host.quit("Alice"));
        assert!(host.client("Alice").is_none());
    }

    #[test]
    fn breaking_a_block_adds_it_to_the_menu() {
        let mut host = host();
        host.join("Alice", None);
        // Surface of an 8-high flat world is grass at y=3.
        break_block(&mut host, "Alice", 1, 3, 1);

        let client = host.client("Alice").unwrap();
        assert_eq!(client.chat, vec!["&anew: 1".to_string()]);
        assert_eq!(client.menu.get(&1), Some(&GRASS));
        assert!(!client.menu_open);
        assert_eq!(client.held, GRASS);
        assert_eq!(host.player("Alice").unwrap().held_block, GRASS);
        // Clear, one entry, one hold.
        assert_eq!(client.packets_received, MENU_POSITIONS as usize + 2);
    }

    #[test]
    fn second_pickup_stacks_without_menu_refresh() {
        let mut host = host();
        host.join("Alice", None);
        break_block(&mut host, "Alice", 1, 3, 1);
        let before = host.client("Alice").unwrap().packets_received;
        break_block(&mut host, "Alice", 2, 3, 2);

        let client = host.client("Alice").unwrap();
        assert_eq!(client.chat.last().unwrap(), "&anew: 2");
        assert_eq!(client.packets_received, before);
    }

    #[test]
    fn placing_spends_the_held_block() {
        let mut host = host();
        host.join("Alice", None);
        break_block(&mut host, "Alice", 1, 3, 1);
        break_block(&mut host, "Alice", 2, 3, 2);

        host.handle_console_command("click Alice right 3 3 3");
        assert_eq!(host.client("Alice").unwrap().chat.last().unwrap(), "&cnew: 1");

        host.handle_console_command("click Alice right 3 3 3");
        let client = host.client("Alice").unwrap();
        assert_eq!(client.chat.last().unwrap(), "&anew: 0");
        assert!(client.menu.is_empty());
        assert_eq!(client.held, BLOCK_AIR);
    }

    #[test]
    fn released_and_air_clicks_are_ignored() {
        let mut host = host();
        host.join("Alice", None);
        host.handle_console_command("click Alice left 1 3 1 released");
        host.handle_console_command("click Alice left 1 7 1");
        host.handle_console_command("click Alice left 100 3 1");
        let client = host.client("Alice").unwrap();
        assert!(client.chat.is_empty());
        assert_eq!(client.packets_received, 0);
    }

    #[test]
    fn inventory_command_opens_menu() {
        let mut host = host();
        host.join("Alice", None);
        host.world_mut().set_block(PluginBlockPos { x: 0, y: 3, z: 0 }, GOLD);
        host.world_mut().set_block(PluginBlockPos { x: 1, y: 3, z: 0 }, STONE);
        break_block(&mut host, "Alice", 0, 3, 0);
        break_block(&mut host, "Alice", 1, 3, 0);

        let out = host.handle_console_command(&format!("as Alice /{COMMAND_NAME}"));
        assert_eq!(out, "");
        let client = host.client("Alice").unwrap();
        assert!(client.menu_open);
        assert_eq!(client.menu.get(&1), Some(&GOLD));
        assert_eq!(client.menu.get(&2), Some(&STONE));
        assert_eq!(describe_menu(client), "Menu (open): 1:41 2:1");
    }

    #[test]
    fn extended_block_shows_stored_value() {
        let mut host = host();
        host.join("Alice", None);
        host.world_mut().set_block(PluginBlockPos { x: 0, y: 3, z: 0 }, EXT);
        break_block(&mut host, "Alice", 0, 3, 0);
        // 300 is stored as 44, which the menu shows as-is.
        assert_eq!(host.client("Alice").unwrap().menu.get(&1), Some(&44));
    }

    #[test]
    fn console_cannot_open_inventory() {
        let mut host = host();
        assert_eq!(
            host.handle_console_command("/inventory"),
            "&cThis command can only be used in-game."
        );
    }

    #[test]
    fn unknown_and_denied_commands() {
        let mut host = host();
        host.join("Alice", None);
        host.join("Mallory", Some(PermissionLevel::Banned));

        host.handle_console_command("as Alice /nope");
        assert_eq!(
            host.client("Alice").unwrap().chat,
            vec!["&cUnknown command \"nope\".".to_string()]
        );

        host.handle_console_command("as Mallory /Inventory");
        let client = host.client("Mallory").unwrap();
        assert_eq!(client.chat, vec!["&cOnly Guest+ can use /Inventory.".to_string()]);
        assert!(!client.menu_open);
    }

    #[test]
    fn select_changes_what_right_click_removes() {
        let mut host = host();
        host.join("Alice", None);
        break_block(&mut host, "Alice", 1, 3, 1);
        host.handle_console_command("select Alice 1");
        host.handle_console_command("click Alice right 1 3 1");
        // Alice holds stone, which she has none of: silent.
        assert_eq!(host.client("Alice").unwrap().chat, vec!["&anew: 1".to_string()]);
    }

    #[test]
    fn session_without_hold_support_keeps_selection() {
        let mut manager = PluginManager::new();
        manager.register(Box::new(InventoryPlugin::new(
            SqliteStore::open_in_memory().unwrap(),
        )));
        let defaults = PlayersSection {
            ext_blocks: false,
            supports_hold: false,
            default_rank: PermissionLevel::Guest,
        };
        let mut host = Host::new(World::flat(8, 8, 8), manager, defaults);
        host.enable_plugins();
        host.join("Bob", None);
        host.select_block("Bob", STONE);
        break_block(&mut host, "Bob", 1, 3, 1);

        let client = host.client("Bob").unwrap();
        assert_eq!(client.menu.get(&1), Some(&GRASS));
        assert_eq!(client.held, STONE);
        assert_eq!(client.packets_received, MENU_POSITIONS as usize + 1);
    }

    #[test]
    fn simulated_client_rejects_unknown_opcode() {
        let mut client = SimulatedClient::default();
        let err = client.receive(&Bytes::from_static(&[0x99]), false).unwrap_err();
        assert!(matches!(err, ProtoError::UnknownOpcode(0x99)));
    }

    #[test]
    fn host_rejects_non_click_packets() {
        let mut host = host();
        host.join("Alice", None);
        assert!(matches!(
            host.handle_packet("Alice", Bytes::from_static(&[0x00])),
            Err(ProtoError::UnknownOpcode(0))
        ));
        assert!(host.handle_packet("Alice", Bytes::new()).is_err());
    }

    #[test]
    fn parse_rank_accepts_snake_case() {
        assert_eq!(parse_rank("Operator"), Some(PermissionLevel::Operator));
        assert_eq!(parse_rank("adv_builder"), Some(PermissionLevel::AdvBuilder));
        assert_eq!(parse_rank("wizard"), None);
    }

    #[test]
    fn stop_disables_plugins() {
        let mut host = host();
        assert_eq!(host.handle_console_command("stop"), "Server stopped.");
        assert!(!host.is_running());
        assert!(host.plugin_manager.command("inventory").is_none());
    }
}
