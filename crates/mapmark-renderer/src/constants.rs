//! Rendering constants and configuration
//!
//! This module centralizes all magic numbers and configuration constants
//! used across the renderer to improve maintainability.

/// Map plane constants
pub mod map {
    /// Light checkerboard color for the fallback map
    pub const FALLBACK_LIGHT: [u8; 4] = [206, 212, 201, 255];
    /// Dark checkerboard color for the fallback map
    pub const FALLBACK_DARK: [u8; 4] = [150, 164, 146, 255];
    /// Fallback map texture size in pixels
    pub const FALLBACK_SIZE: u32 = 512;
    /// Fallback map checkerboard cells per edge
    pub const FALLBACK_CELLS: u32 = 16;
}

/// Marker sprite constants
pub mod sprite {
    /// Fallback marker pin color
    pub const FALLBACK_COLOR: [u8; 4] = [226, 62, 52, 255];
    /// Fallback marker texture size (width, height), same ratio as the sprite
    pub const FALLBACK_SIZE: (u32, u32) = (59, 72);
}

/// Debug arrow constants
pub mod arrow {
    /// Arrow length in world units
    pub const LENGTH: f32 = 5.0;
    /// Head length as a fraction of the arrow length
    pub const HEAD_FRACTION: f32 = 0.2;
    /// Head half-width as a fraction of the arrow length
    pub const HEAD_WIDTH_FRACTION: f32 = 0.1;
    /// Color of the label offset arrow (red)
    pub const OFFSET_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
    /// Color of the world X reference arrow (green)
    pub const X_AXIS_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
}

/// Instance buffer limits
pub mod instances {
    /// Maximum number of marker sprites
    pub const MAX_SPRITES: u32 = 256;
}

/// Camera default parameters
pub mod camera {
    /// Default field of view in degrees
    pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
    /// Default near clipping plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Default far clipping plane
    pub const DEFAULT_FAR: f32 = 1000.0;
    /// Default orbit distance (camera starts at y = 60)
    pub const DEFAULT_DISTANCE: f32 = 60.0;
    /// Minimum pitch angle in degrees
    pub const MIN_PITCH_DEGREES: f32 = -89.9;
    /// Maximum pitch angle in degrees
    pub const MAX_PITCH_DEGREES: f32 = 89.9;
    /// Pan sensitivity multiplier
    pub const PAN_SCALE: f32 = 0.002;
    /// Zoom sensitivity multiplier
    pub const ZOOM_SCALE: f32 = 0.1;
    /// Orbit sensitivity (radians per pixel)
    pub const ORBIT_SCALE: f32 = 0.005;
    /// Minimum orbit distance
    pub const MIN_DISTANCE: f32 = 1.0;
    /// Maximum orbit distance
    pub const MAX_DISTANCE: f32 = 500.0;
}

/// Viewport rendering constants
pub mod viewport {
    /// Background clear color
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// MSAA sample count
    pub const SAMPLE_COUNT: u32 = 4;
    /// Depth buffer format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}
