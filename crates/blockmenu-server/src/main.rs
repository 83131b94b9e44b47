mod config;
mod host;
mod plugin_manager;
mod world;

use std::path::Path;

use blockmenu_inventory::{InventoryError, InventoryPlugin, SqliteStore};
use config::ServerConfig;
use host::Host;
use plugin_manager::PluginManager;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info};
use world::World;

fn open_store(database: &str) -> Result<SqliteStore, InventoryError> {
    if database == ":memory:" {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(database)
    }
}

#[tokio::main]
async fn main() {
    let config = match ServerConfig::load_or_default("server.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load server.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "{} v{} starting (database: {})",
        config.server.name,
        env!("CARGO_PKG_VERSION"),
        config.storage.database
    );

    let store = match open_store(&config.storage.database) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open {}: {e}", config.storage.database);
            std::process::exit(1);
        }
    };

    let mut plugin_manager = PluginManager::new();
    plugin_manager.register(Box::new(InventoryPlugin::new(store)));
    plugin_manager.load_configs(Path::new(&config.server.plugins_directory));

    let world = World::flat(config.world.width, config.world.height, config.world.length);
    let (w, h, l) = world.dimensions();
    info!("World: flat {w}x{h}x{l}");

    let mut host = Host::new(world, plugin_manager, config.players);
    host.enable_plugins();
    info!("Ready. Type \"help\" for console commands.");

    // Console REPL: read lines from stdin
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        let output = host.handle_console_command(&line);
                        if !output.is_empty() {
                            println!("{output}");
                        }
                        if !host.is_running() {
                            break;
                        }
                    }
                    // stdin closed
                    Ok(None) => break,
                    Err(e) => {
                        error!("Console read failed: {e}");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    if host.is_running() {
        host.shutdown();
    }
    info!("Server shut down.");
}
