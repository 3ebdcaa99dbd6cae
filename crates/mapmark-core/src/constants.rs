//! Global constants for mapmark-core

/// Edge length of the square map plane in world units
pub const MAP_PLANE_SIZE: f32 = 40.0;

/// Height at which marker sprites hover above the map plane
pub const MARKER_HOVER_HEIGHT: f32 = 0.5;

/// Marker sprite scale (width, height), matching the 118:144 marker image
pub const MARKER_SPRITE_SCALE: [f32; 2] = [1.0, 1.22];

/// Number of markers scattered when nothing else is configured
pub const DEFAULT_MARKER_COUNT: usize = 1;

/// Base vertical label offset in pixels before angle compensation
pub const LABEL_BASE_OFFSET: f32 = 80.0;

/// Default label title
pub const DEFAULT_LABEL_TITLE: &str = "This is label";

/// Default label body text
pub const DEFAULT_LABEL_BODY: &str = "Lorem ipsum dolor, sit amet consectetur adipisicing elit.";

/// File name of the map texture inside the resources directory
pub const MAP_TEXTURE_FILE: &str = "map.png";

/// File name of the marker texture inside the resources directory
pub const MARKER_TEXTURE_FILE: &str = "marker.png";
