//! Host-facing plugin: the `/Inventory` command and the click handler.

use blockmenu_plugin_api::{
    EventKind, EventResult, MouseAction, MouseButton, PermissionLevel, Plugin, PluginEvent,
    PluginInfo, Priority, ServerApi, BLOCK_AIR, BLOCK_INVALID,
};
use tracing::{error, info, warn};

use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::service::InventoryService;
use crate::store::InventoryStore;

pub const PLUGIN_NAME: &str = "InventoryExample";
pub const COMMAND_NAME: &str = "Inventory";
pub const COMMAND_HELP: &str = "&T/Inventory &H- Opens the inventory.";

/// Breaking a block picks it up, placing the held block spends one.
pub struct InventoryPlugin<S> {
    service: InventoryService<S>,
}

impl<S: InventoryStore> InventoryPlugin<S> {
    pub fn new(store: S) -> Self {
        Self {
            service: InventoryService::new(store),
        }
    }

    pub fn service(&self) -> &InventoryService<S> {
        &self.service
    }

    fn handle_click(
        &self,
        event: &PluginEvent,
        api: &mut dyn ServerApi,
    ) -> Result<(), InventoryError> {
        let PluginEvent::PlayerClick {
            player,
            button,
            action,
            position,
            ..
        } = event;
        if *action != MouseAction::Pressed {
            return Ok(());
        }

        let clicked = api.get_block(*position);
        if clicked == BLOCK_AIR || clicked == BLOCK_INVALID {
            return Ok(());
        }

        match button {
            MouseButton::Left => {
                self.service.add_item(player, clicked, 1, api)?;
            }
            MouseButton::Right => {
                self.service.remove_item(player, player.held_block, 1, api)?;
            }
            MouseButton::Middle => {}
        }
        Ok(())
    }
}

impl<S: InventoryStore> Plugin for InventoryPlugin<S> {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: "Stores picked-up blocks and shows them in the block menu".into(),
            author: "blockmenu contributors".into(),
        }
    }

    fn on_enable(&mut self, api: &mut dyn ServerApi) {
        // The table must exist before the first click reads from it.
        if let Err(e) = self.service.store().create_table() {
            error!("Failed to create inventory table, {PLUGIN_NAME} stays inactive: {e}");
            return;
        }
        api.register_command(COMMAND_NAME, COMMAND_HELP, PermissionLevel::Guest, PLUGIN_NAME);
        api.subscribe(EventKind::PlayerClick, Priority::Low, PLUGIN_NAME);
        info!("{PLUGIN_NAME} enabled");
    }

    fn on_disable(&mut self, api: &mut dyn ServerApi) {
        api.unregister_command(COMMAND_NAME);
        api.unsubscribe(EventKind::PlayerClick, PLUGIN_NAME);
        info!("{PLUGIN_NAME} disabled");
    }

    fn on_event(&mut self, event: &PluginEvent, api: &mut dyn ServerApi) -> EventResult {
        if let Err(e) = self.handle_click(event, api) {
            error!("Inventory click handling failed: {e}");
        }
        EventResult::Continue
    }

    fn on_command(
        &mut self,
        command: &str,
        _args: &[String],
        sender: &str,
        api: &mut dyn ServerApi,
    ) -> Option<String> {
        if !command.eq_ignore_ascii_case(COMMAND_NAME) {
            return None;
        }
        let Some(player) = api.get_player(sender) else {
            return Some("&cThis command can only be used in-game.".into());
        };
        match self.service.update_block_menu(&player, true, api) {
            Ok(_) => None,
            Err(e) => {
                error!("Failed to open inventory for {sender}: {e}");
                None
            }
        }
    }

    fn default_config(&self) -> Option<serde_json::Value> {
        serde_json::to_value(InventoryConfig::default()).ok()
    }

    fn load_config(&mut self, config: serde_json::Value) {
        match serde_json::from_value::<InventoryConfig>(config) {
            Ok(config) => self.service.set_config(config),
            Err(e) => warn!("Invalid {PLUGIN_NAME} config, keeping defaults: {e}"),
        }
    }
}
