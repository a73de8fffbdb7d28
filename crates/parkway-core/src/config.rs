//! Park configuration loaded from `parkway-config.yaml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! playable 64x64 park. The `PARKWAY_SANDBOX` environment variable can force
//! the ownership bypass on without editing the file.

use std::path::Path;

use parkway_world::{MapSettings, ParkWorld};
use serde::Deserialize;

/// Environment variable that forces sandbox mode when set to `1` or `true`.
pub const SANDBOX_ENV: &str = "PARKWAY_SANDBOX";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The YAML content could not be parsed.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParkConfig {
    /// Map generation and element pool sizing.
    #[serde(default)]
    pub map: MapConfig,

    /// Rule relaxations.
    #[serde(default)]
    pub cheats: CheatsConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Map generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Tiles per side.
    #[serde(default = "default_size")]
    pub size: i32,

    /// Element slots in the whole map.
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,

    /// Elements allowed on a single tile.
    #[serde(default = "default_max_elements_per_tile")]
    pub max_elements_per_tile: usize,

    /// Initial land height, in world units (multiples of 8).
    #[serde(default = "default_base_height")]
    pub base_height: i32,

    /// Initial water height; `0` leaves the map dry.
    #[serde(default)]
    pub water_height: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            max_elements: default_max_elements(),
            max_elements_per_tile: default_max_elements_per_tile(),
            base_height: default_base_height(),
            water_height: 0,
        }
    }
}

impl MapConfig {
    /// The settings the tile map is generated from.
    pub const fn settings(&self) -> MapSettings {
        MapSettings {
            size: self.size,
            max_elements: self.max_elements,
            max_elements_per_tile: self.max_elements_per_tile,
            base_height: self.base_height,
            water_height: self.water_height,
        }
    }
}

/// Rule relaxations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheatsConfig {
    /// Build anywhere on the map, owned or not.
    #[serde(default)]
    pub sandbox_mode: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

const fn default_size() -> i32 {
    64
}
const fn default_max_elements() -> usize {
    4096
}
const fn default_max_elements_per_tile() -> usize {
    16
}
const fn default_base_height() -> i32 {
    112
}
fn default_level() -> String {
    "info".to_owned()
}

impl ParkConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_sandbox_override(std::env::var(SANDBOX_ENV).ok().as_deref());
    }

    /// Force sandbox mode on when `value` is `1` or `true`. Anything else
    /// leaves the file setting alone.
    pub fn apply_sandbox_override(&mut self, value: Option<&str>) {
        if let Some(value) = value
            && (value == "1" || value.eq_ignore_ascii_case("true"))
        {
            tracing::info!(env = SANDBOX_ENV, "Sandbox mode forced on by environment");
            self.cheats.sandbox_mode = true;
        }
    }

    /// Generate an empty park from this configuration.
    pub fn build_world(&self) -> ParkWorld {
        let mut world = ParkWorld::new(&self.map.settings());
        world.set_sandbox_mode(self.cheats.sandbox_mode);
        world
    }
}
