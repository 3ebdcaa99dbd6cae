//! mapmark core
//!
//! GPU-free building blocks of the map viewer: marker records, random
//! marker placement, the per-frame label projector and image decoding.

pub mod constants;
pub mod image_data;
pub mod marker;
pub mod placement;
pub mod projection;

pub use image_data::{AssetError, ImageData, fit_size};
pub use marker::{LabelContent, MarkerId, MarkerRecord, MarkerSet};
pub use placement::{PlacementConfig, random_position, scatter_markers, scatter_markers_with};
pub use projection::{CameraState, LabelPlacement, LabelProjector, Viewport};
