//! Map Viewer Renderer
//!
//! WGPU-based rendering of the map plane, marker sprites and label offset
//! arrows.
//!
//! # Module Structure
//!
//! ```text
//! mapmark-renderer/
//! ├── sub_renderers/   # Map plane, sprites, arrows
//! ├── renderer/        # Main Renderer, camera controller, render pass
//! ├── shaders/         # WGSL sources
//! ├── camera.rs        # Orbit camera
//! ├── config.rs        # Serializable renderer settings
//! ├── pipeline.rs      # Pipeline utilities
//! └── texture.rs       # Image upload and fallback images
//! ```

pub mod camera;
pub mod config;
pub mod constants;
pub mod instanced;
pub mod pipeline;
pub mod renderer;
pub mod sub_renderers;
pub mod texture;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use config::{CameraConfig, DisplayConfig, MapConfig, RendererConfig, ViewportConfig};
pub use renderer::{CameraController, DisplayOptions, Renderer};
pub use sub_renderers::{ArrowRenderer, MapPlaneRenderer, SpriteInstance, SpriteRenderer};
pub use texture::{GpuTexture, fallback_map_image, fallback_marker_image};
