//! Sub-renderers for the map viewer.
//!
//! - [`MapPlaneRenderer`]: textured ground plane
//! - [`SpriteRenderer`]: camera-facing marker sprites
//! - [`ArrowRenderer`]: label offset and X reference arrows

pub mod arrow;
pub mod map_plane;
pub mod sprite;

pub use arrow::{ArrowRenderer, arrow_lines};
pub use map_plane::{MapPlaneRenderer, plane_geometry};
pub use sprite::{SpriteInstance, SpriteRenderer};
