//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

use crate::constants::{camera, viewport};

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
    /// MSAA sample count (1 = disabled, 4 = antialiased)
    pub msaa_sample_count: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let c = viewport::CLEAR_COLOR;
        Self {
            background_color: [c.r as f32, c.g as f32, c.b as f32, c.a as f32],
            msaa_sample_count: viewport::SAMPLE_COUNT,
        }
    }
}

impl ViewportConfig {
    /// Sample count supported on every backend (1 or 4)
    pub fn sample_count(&self) -> u32 {
        if self.msaa_sample_count > 1 { 4 } else { 1 }
    }

    /// Clear color as a wgpu color
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Pan sensitivity multiplier
    pub pan_sensitivity: f32,
    /// Zoom sensitivity multiplier
    pub zoom_sensitivity: f32,
    /// Orbit sensitivity multiplier
    pub orbit_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: camera::DEFAULT_FOV_DEGREES,
            near_plane: camera::DEFAULT_NEAR,
            far_plane: camera::DEFAULT_FAR,
            pan_sensitivity: camera::PAN_SCALE,
            zoom_sensitivity: camera::ZOOM_SCALE,
            orbit_sensitivity: camera::ORBIT_SCALE,
        }
    }
}

/// Map plane configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Edge length of the square map plane in world units
    pub size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: mapmark_core::constants::MAP_PLANE_SIZE,
        }
    }
}

/// Visibility toggles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw the map plane
    pub show_map: bool,
    /// Draw marker sprites
    pub show_markers: bool,
    /// Draw the label offset and X reference arrows
    pub show_offset_arrows: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_map: true,
            show_markers: true,
            show_offset_arrows: true,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Map plane settings
    #[serde(default)]
    pub map: MapConfig,
    /// Visibility settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_viewer_setup() {
        let config = RendererConfig::new();
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.near_plane, 0.1);
        assert_eq!(config.camera.far_plane, 1000.0);
        assert_eq!(config.map.size, 40.0);
        assert_eq!(config.viewport.sample_count(), 4);
        assert!(config.display.show_offset_arrows);
    }

    #[test]
    fn test_sample_count_sanitized() {
        let mut viewport = ViewportConfig::default();
        viewport.msaa_sample_count = 8;
        assert_eq!(viewport.sample_count(), 4);
        viewport.msaa_sample_count = 0;
        assert_eq!(viewport.sample_count(), 1);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: RendererConfig =
            ron::from_str("(camera: (fov_degrees: 60.0), display: (show_offset_arrows: false))")
                .unwrap();
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.far_plane, 1000.0);
        assert!(!config.display.show_offset_arrows);
        assert!(config.display.show_markers);
        assert_eq!(config.map, MapConfig::default());
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut config = RendererConfig::new();
        config.viewport.background_color = [0.1, 0.2, 0.3, 1.0];
        config.map.size = 80.0;
        let text = ron::to_string(&config).unwrap();
        let parsed: RendererConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
