//! Plugin manager: loads, enables, and dispatches events and commands to plugins.
//!
//! Also owns the command registry and the event bus. Registrations made by a
//! plugin during a callback are applied as soon as the callback returns.

use std::collections::HashMap;
use std::path::Path;

use blockmenu_plugin_api::{
    BlockId, EventKind, EventResult, LogLevel, PermissionLevel, Plugin, PluginBlockPos,
    PluginEvent, PluginPlayer, Priority, ServerApi,
};
use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::world::World;

// ─── Types ───────────────────────────────────────────────────────────────────

/// Read-only view of host state for plugin API reads.
pub struct ServerSnapshot<'a> {
    pub players: &'a HashMap<String, PluginPlayer>,
    pub world: &'a World,
}

/// Deferred side-effect requested by a plugin during a callback.
#[derive(Debug)]
pub enum PendingAction {
    SendMessage {
        player_name: String,
        message: String,
    },
    SendPacket {
        player_name: String,
        packet: Bytes,
    },
    HoldBlock {
        player_name: String,
        block: BlockId,
        prevent_change: bool,
    },
    RegisterCommand {
        name: String,
        help: String,
        permission: PermissionLevel,
        plugin_name: String,
    },
    UnregisterCommand {
        name: String,
    },
    Subscribe {
        kind: EventKind,
        priority: Priority,
        plugin_name: String,
    },
    Unsubscribe {
        kind: EventKind,
        plugin_name: String,
    },
}

/// A command registered by a plugin.
#[derive(Debug, Clone)]
pub struct RegisteredCommand {
    pub name: String,
    pub help: String,
    pub permission: PermissionLevel,
    pub plugin_name: String,
}

#[derive(Debug, Clone)]
struct Subscription {
    kind: EventKind,
    priority: Priority,
    plugin_name: String,
}

/// Outcome of routing a command to its plugin.
#[derive(Debug)]
pub enum CommandDispatch {
    Unknown,
    Denied { required: PermissionLevel },
    Handled {
        response: Option<String>,
        actions: Vec<PendingAction>,
    },
}

// ─── ServerApiImpl ───────────────────────────────────────────────────────────

/// Implements `ServerApi` using a snapshot for reads and accumulating PendingActions for writes.
struct ServerApiImpl<'a> {
    snapshot: &'a ServerSnapshot<'a>,
    actions: Vec<PendingAction>,
}

impl<'a> ServerApiImpl<'a> {
    fn new(snapshot: &'a ServerSnapshot<'a>) -> Self {
        Self {
            snapshot,
            actions: Vec::new(),
        }
    }

    fn take_actions(self) -> Vec<PendingAction> {
        self.actions
    }
}

impl ServerApi for ServerApiImpl<'_> {
    fn get_player(&self, name: &str) -> Option<PluginPlayer> {
        self.snapshot.players.get(name).cloned()
    }

    fn send_message(&mut self, player_name: &str, message: &str) {
        self.actions.push(PendingAction::SendMessage {
            player_name: player_name.to_string(),
            message: message.to_string(),
        });
    }

    fn send_packet(&mut self, player_name: &str, packet: Bytes) {
        self.actions.push(PendingAction::SendPacket {
            player_name: player_name.to_string(),
            packet,
        });
    }

    fn hold_block(&mut self, player_name: &str, block: BlockId, prevent_change: bool) -> bool {
        let supported = self
            .snapshot
            .players
            .get(player_name)
            .is_some_and(|p| p.supports_hold);
        if supported {
            self.actions.push(PendingAction::HoldBlock {
                player_name: player_name.to_string(),
                block,
                prevent_change,
            });
        }
        supported
    }

    fn get_block(&self, position: PluginBlockPos) -> BlockId {
        self.snapshot.world.get_block(position)
    }

    fn log(&self, level: LogLevel, message: &str) {
        log_plugin(level, message);
    }

    fn register_command(
        &mut self,
        name: &str,
        help: &str,
        permission: PermissionLevel,
        plugin_name: &str,
    ) {
        self.actions.push(PendingAction::RegisterCommand {
            name: name.to_string(),
            help: help.to_string(),
            permission,
            plugin_name: plugin_name.to_string(),
        });
    }

    fn unregister_command(&mut self, name: &str) {
        self.actions.push(PendingAction::UnregisterCommand {
            name: name.to_string(),
        });
    }

    fn subscribe(&mut self, kind: EventKind, priority: Priority, plugin_name: &str) {
        self.actions.push(PendingAction::Subscribe {
            kind,
            priority,
            plugin_name: plugin_name.to_string(),
        });
    }

    fn unsubscribe(&mut self, kind: EventKind, plugin_name: &str) {
        self.actions.push(PendingAction::Unsubscribe {
            kind,
            plugin_name: plugin_name.to_string(),
        });
    }
}

fn log_plugin(level: LogLevel, message: &str) {
    match level {
        LogLevel::Info => info!("[plugin] {message}"),
        LogLevel::Warn => warn!("[plugin] {message}"),
        LogLevel::Error => error!("[plugin] {message}"),
        LogLevel::Debug => debug!("[plugin] {message}"),
    }
}

// ─── PluginManager ───────────────────────────────────────────────────────────

/// Manages all loaded plugins, their command registrations and event subscriptions.
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    /// Lowercased command name → registration.
    commands: HashMap<String, RegisteredCommand>,
    /// Kept sorted by descending priority.
    subscriptions: Vec<Subscription>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            commands: HashMap::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Register a plugin (call before enable_all).
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        info!("Registered plugin: {}", plugin.info().name);
        self.plugins.push(plugin);
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.info().name).collect()
    }

    /// Enable all registered plugins. Returns actions that need the host.
    pub fn enable_all(&mut self, snapshot: &ServerSnapshot) -> Vec<PendingAction> {
        let mut all_actions = Vec::new();
        for plugin in &mut self.plugins {
            let mut api = ServerApiImpl::new(snapshot);
            plugin.on_enable(&mut api);
            all_actions.extend(api.take_actions());
        }
        self.apply_internal_actions(all_actions)
    }

    /// Disable all registered plugins.
    pub fn disable_all(&mut self, snapshot: &ServerSnapshot) -> Vec<PendingAction> {
        let mut all_actions = Vec::new();
        for plugin in &mut self.plugins {
            let mut api = ServerApiImpl::new(snapshot);
            plugin.on_disable(&mut api);
            all_actions.extend(api.take_actions());
        }
        self.apply_internal_actions(all_actions)
    }

    /// Dispatch an event to its subscribers, highest priority first.
    /// Returns the combined result and pending actions.
    pub fn dispatch(
        &mut self,
        event: &PluginEvent,
        snapshot: &ServerSnapshot,
    ) -> (EventResult, Vec<PendingAction>) {
        let kind = event.kind();
        let targets: Vec<String> = self
            .subscriptions
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.plugin_name.clone())
            .collect();

        let mut all_actions = Vec::new();
        let mut final_result = EventResult::Continue;

        for plugin_name in targets {
            let Some(plugin) = self
                .plugins
                .iter_mut()
                .find(|p| p.info().name == plugin_name)
            else {
                continue;
            };
            let mut api = ServerApiImpl::new(snapshot);
            let result = plugin.on_event(event, &mut api);
            all_actions.extend(api.take_actions());

            if result == EventResult::Cancelled {
                final_result = EventResult::Cancelled;
                break; // Stop propagation
            }
        }

        (final_result, self.apply_internal_actions(all_actions))
    }

    /// Route a command to the plugin that registered it, checking the rank floor.
    pub fn handle_command(
        &mut self,
        command: &str,
        args: &[String],
        sender: &str,
        rank: PermissionLevel,
        snapshot: &ServerSnapshot,
    ) -> CommandDispatch {
        let Some(entry) = self.commands.get(&command.to_lowercase()) else {
            return CommandDispatch::Unknown;
        };
        if rank < entry.permission {
            return CommandDispatch::Denied {
                required: entry.permission,
            };
        }
        let (name, plugin_name) = (entry.name.clone(), entry.plugin_name.clone());

        let Some(plugin) = self
            .plugins
            .iter_mut()
            .find(|p| p.info().name == plugin_name)
        else {
            return CommandDispatch::Unknown;
        };
        let mut api = ServerApiImpl::new(snapshot);
        let response = plugin.on_command(&name, args, sender, &mut api);
        let actions = self.apply_internal_actions(api.take_actions());
        CommandDispatch::Handled { response, actions }
    }

    /// Look up a registered command (case-insensitive).
    pub fn command(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(&name.to_lowercase())
    }

    /// All registered commands, sorted by name.
    pub fn commands(&self) -> Vec<&RegisteredCommand> {
        let mut commands: Vec<_> = self.commands.values().collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    /// Load configs for all plugins from `<dir>/<plugin>/config.json`,
    /// writing the default config where none exists.
    pub fn load_configs(&mut self, dir: &Path) {
        for plugin in &mut self.plugins {
            let Some(default_config) = plugin.default_config() else {
                continue;
            };
            let name = plugin.info().name;
            let path = dir.join(&name).join("config.json");
            let config = if path.exists() {
                read_plugin_config(&path).unwrap_or_else(|e| {
                    warn!("Config for {name} unusable, using defaults: {e}");
                    default_config
                })
            } else {
                if let Err(e) = write_plugin_config(&path, &default_config) {
                    warn!("Could not write default config for {name}: {e}");
                }
                default_config
            };
            plugin.load_config(config);
        }
    }

    /// Apply registry and event-bus actions immediately; return the rest.
    fn apply_internal_actions(&mut self, actions: Vec<PendingAction>) -> Vec<PendingAction> {
        let mut external = Vec::new();
        for action in actions {
            match action {
                PendingAction::RegisterCommand {
                    name,
                    help,
                    permission,
                    plugin_name,
                } => {
                    debug!("Command /{name} registered by {plugin_name}");
                    self.commands.insert(
                        name.to_lowercase(),
                        RegisteredCommand {
                            name,
                            help,
                            permission,
                            plugin_name,
                        },
                    );
                }
                PendingAction::UnregisterCommand { name } => {
                    self.commands.remove(&name.to_lowercase());
                }
                PendingAction::Subscribe {
                    kind,
                    priority,
                    plugin_name,
                } => {
                    self.subscriptions.push(Subscription {
                        kind,
                        priority,
                        plugin_name,
                    });
                    // Stable: equal priorities keep registration order.
                    self.subscriptions
                        .sort_by(|a, b| b.priority.cmp(&a.priority));
                }
                PendingAction::Unsubscribe { kind, plugin_name } => {
                    self.subscriptions
                        .retain(|s| !(s.kind == kind && s.plugin_name == plugin_name));
                }
                other => external.push(other),
            }
        }
        external
    }
}

fn read_plugin_config(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_plugin_config(
    path: &Path,
    config: &serde_json::Value,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
