//! Plugin API: traits, events, and server API for plugin authors.
//!
//! This crate defines the contract between the host server and its plugins.
//! It has no dependency on the host or on the packet codec; plugins send
//! already-encoded packets as raw bytes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

// ─── Types ───────────────────────────────────────────────────────────────────

/// Raw block id as the client sees it.
pub type BlockId = u16;

/// The empty block.
pub const BLOCK_AIR: BlockId = 0;
/// Returned for positions outside the level.
pub const BLOCK_INVALID: BlockId = 0xff;

/// Information about an online player, passed to plugins in events.
#[derive(Debug, Clone)]
pub struct PluginPlayer {
    /// Stable account name.
    pub name: String,
    /// Block currently selected in the hotbar.
    pub held_block: BlockId,
    /// Session negotiated `ExtBlocks` (two-byte block ids).
    pub ext_blocks: bool,
    /// Session negotiated `HeldBlock` (server may force the held block).
    pub supports_hold: bool,
    pub rank: PermissionLevel,
}

/// Block position for plugin events (decoupled from the packet codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginBlockPos {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Pressed,
    Released,
}

/// Face of the targeted block that the click ray entered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetBlockFace {
    AwayX,
    TowardsX,
    AwayY,
    TowardsY,
    AwayZ,
    TowardsZ,
    None,
}

/// Rank floor required to use a command. Ordered from least to most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    Banned,
    Guest,
    Builder,
    AdvBuilder,
    Operator,
    Admin,
    Owner,
}

/// Order in which subscribed handlers see an event. Higher runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

/// Log level for plugin logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Result of dispatching an event to a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue normal handling.
    Continue,
    /// Event was cancelled by this plugin.
    Cancelled,
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Event kinds a plugin can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerClick,
}

/// All events that plugins can listen to.
#[derive(Debug, Clone)]
pub enum PluginEvent {
    PlayerClick {
        player: PluginPlayer,
        button: MouseButton,
        action: MouseAction,
        yaw: u16,
        pitch: u16,
        target_entity: u8,
        position: PluginBlockPos,
        face: TargetBlockFace,
    },
}

impl PluginEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PluginEvent::PlayerClick { .. } => EventKind::PlayerClick,
        }
    }
}

// ─── Plugin trait ────────────────────────────────────────────────────────────

/// Metadata about a plugin.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
}

/// The Plugin trait: implemented by every plugin the host loads.
pub trait Plugin: Send {
    /// Return plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called when the plugin is loaded. Use `api` to register commands and subscribe to events.
    fn on_enable(&mut self, api: &mut dyn ServerApi);

    /// Called when the plugin is unloaded. Undo whatever `on_enable` registered.
    fn on_disable(&mut self, api: &mut dyn ServerApi) {
        let _ = api;
    }

    /// Called for every event of a subscribed kind. Return `Cancelled` to stop propagation.
    fn on_event(&mut self, event: &PluginEvent, api: &mut dyn ServerApi) -> EventResult {
        let _ = (event, api);
        EventResult::Continue
    }

    /// Called when a plugin-registered command is executed. Return a response message.
    fn on_command(
        &mut self,
        command: &str,
        args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> Option<String> {
        let _ = (command, args, sender, api);
        None
    }

    /// Return a default config as JSON. If `Some`, the plugin gets a config file.
    fn default_config(&self) -> Option<serde_json::Value> {
        None
    }

    /// Called with the loaded config (from `plugins/<name>/config.json`).
    fn load_config(&mut self, _config: serde_json::Value) {}
}

// ─── Server API ──────────────────────────────────────────────────────────────

/// Access to host state, passed to plugins during callbacks.
///
/// Read methods return data immediately. Write methods may be deferred until
/// the plugin callback returns, but are applied in call order.
pub trait ServerApi {
    // --- Players ---
    fn get_player(&self, name: &str) -> Option<PluginPlayer>;
    fn send_message(&mut self, player_name: &str, message: &str);
    /// Send an already-encoded packet to the player's session.
    fn send_packet(&mut self, player_name: &str, packet: Bytes);
    /// Force the block the player holds. Returns `false` when the session
    /// cannot honour the request.
    fn hold_block(&mut self, player_name: &str, block: BlockId, prevent_change: bool) -> bool;

    // --- World ---
    fn get_block(&self, position: PluginBlockPos) -> BlockId;

    // --- Server ---
    fn log(&self, level: LogLevel, message: &str);

    // --- Commands ---
    fn register_command(
        &mut self,
        name: &str,
        help: &str,
        permission: PermissionLevel,
        plugin_name: &str,
    );
    fn unregister_command(&mut self, name: &str);

    // --- Events ---
    fn subscribe(&mut self, kind: EventKind, priority: Priority, plugin_name: &str);
    fn unsubscribe(&mut self, kind: EventKind, plugin_name: &str);
}

// ─── Tests ───────────────────────────────────────────────────────────────────
