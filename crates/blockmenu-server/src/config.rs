use blockmenu_plugin_api::PermissionLevel;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub players: PlayersSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Directory holding per-plugin config files.
    #[serde(default = "default_plugins_directory")]
    pub plugins_directory: String,
}

fn default_server_name() -> String {
    "blockmenu".into()
}

fn default_plugins_directory() -> String {
    "plugins".into()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            plugins_directory: default_plugins_directory(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// SQLite database file. `:memory:` keeps everything in memory.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "inventory.db".into()
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_dimension")]
    pub width: u16,
    #[serde(default = "default_dimension")]
    pub height: u16,
    #[serde(default = "default_dimension")]
    pub length: u16,
}

fn default_dimension() -> u16 {
    64
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            length: default_dimension(),
        }
    }
}

/// Capabilities given to simulated players on `join`.
#[derive(Debug, Deserialize)]
pub struct PlayersSection {
    #[serde(default = "default_true")]
    pub ext_blocks: bool,
    #[serde(default = "default_true")]
    pub supports_hold: bool,
    #[serde(default = "default_rank")]
    pub default_rank: PermissionLevel,
}

fn default_true() -> bool {
    true
}

fn default_rank() -> PermissionLevel {
    PermissionLevel::Guest
}

impl Default for PlayersSection {
    fn default() -> Self {
        Self {
            ext_blocks: true,
            supports_hold: true,
            default_rank: default_rank(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `path`, or fall back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
