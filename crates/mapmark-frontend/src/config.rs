//! Application configuration
//!
//! Settings are read from an optional RON file. A missing file means
//! defaults; every field falls back to its default when absent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use mapmark_core::PlacementConfig;
use mapmark_core::constants::LABEL_BASE_OFFSET;
use mapmark_renderer::RendererConfig;
use mapmark_renderer::constants::instances::MAX_SPRITES;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "mapmark.ron";
/// Environment variable overriding the configuration file path
pub const CONFIG_ENV: &str = "MAPMARK_CONFIG";
/// Environment variable overriding the resources directory
pub const RESOURCES_ENV: &str = "MAPMARK_RESOURCES";
/// Default resources directory (native) and URL prefix (web)
pub const DEFAULT_RESOURCES_DIR: &str = "resources";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Label overlay settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    /// Base vertical lift in pixels before the viewing-angle factor
    pub base_offset: f32,
    /// Draw labels at all
    pub visible: bool,
    /// Hide labels whose anchor is behind the camera
    pub hide_behind_camera: bool,
    /// Maximum label width in pixels
    pub max_width: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            base_offset: LABEL_BASE_OFFSET,
            visible: true,
            hide_behind_camera: true,
            max_width: 200.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Renderer settings
    pub renderer: RendererConfig,
    /// Marker scattering
    pub markers: PlacementConfig,
    /// Label overlay
    pub labels: LabelConfig,
    /// Directory (native) or URL prefix (web) holding `map.png` and `marker.png`
    pub resources_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            markers: PlacementConfig::default(),
            labels: LabelConfig::default(),
            resources_dir: DEFAULT_RESOURCES_DIR.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to pretty RON text.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Marker placement constrained to the map plane and sprite capacity.
    pub fn placement(&self) -> PlacementConfig {
        let mut placement = self.markers.clone();
        let defaults = PlacementConfig::default();
        let map_half = self.renderer.map.size * 0.5;
        let map_half = if map_half.is_finite() {
            map_half.max(0.0)
        } else {
            defaults.half_extent
        };
        if !placement.half_extent.is_finite() {
            tracing::warn!(value = placement.half_extent, "Invalid half_extent, using default");
            placement.half_extent = defaults.half_extent;
        }
        placement.half_extent = placement.half_extent.clamp(0.0, map_half);
        if !placement.hover_height.is_finite() {
            tracing::warn!(value = placement.hover_height, "Invalid hover_height, using default");
            placement.hover_height = defaults.hover_height;
        }
        if placement.count > MAX_SPRITES as usize {
            tracing::warn!(
                requested = placement.count,
                max = MAX_SPRITES,
                "Marker count capped"
            );
            placement.count = MAX_SPRITES as usize;
        }
        placement
    }
}

/// Loads, holds and saves the configuration
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    path: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            path: None,
        }
    }
}

impl ConfigManager {
    /// Load from `$MAPMARK_CONFIG` or `./mapmark.ron`.
    ///
    /// Errors are logged and replaced by defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let mut manager = match Self::load_from(&path) {
            Ok(manager) => manager,
            Err(e) => {
                tracing::warn!("Failed to load config {}: {}", path.display(), e);
                Self {
                    config: AppConfig::default(),
                    path: Some(path),
                }
            }
        };

        if let Ok(dir) = std::env::var(RESOURCES_ENV) {
            tracing::debug!(%dir, "Resources directory overridden");
            manager.config.resources_dir = dir;
        }
        manager
    }

    /// Web builds have no config file.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::info!("Loaded config from {}", path.display());
                AppConfig::from_ron(&text)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                AppConfig::default()
            }
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        Ok(Self {
            config,
            path: Some(path.to_path_buf()),
        })
    }

    /// Write the configuration back to its file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Err(ConfigError::Io("No config path".to_string()));
        };
        self.save_to(path)
    }

    /// Write the configuration to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = self.config.to_ron()?;
        std::fs::write(path.as_ref(), text).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Current configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable configuration
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// File backing this configuration, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Restore every setting to its default.
    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::default();
    }
}

/// Configuration shared between the app and its panels
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

/// Wrap a manager for sharing.
pub fn create_shared_config(manager: ConfigManager) -> SharedConfig {
    Arc::new(RwLock::new(manager))
}
