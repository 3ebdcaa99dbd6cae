//! Visibility toggles for rendering elements

use crate::config::DisplayConfig;

/// Which scene elements are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Draw the map plane
    pub show_map: bool,
    /// Draw marker sprites
    pub show_markers: bool,
    /// Draw the offset and X reference arrows
    pub show_offset_arrows: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DisplayOptions {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            show_map: config.show_map,
            show_markers: config.show_markers,
            show_offset_arrows: config.show_offset_arrows,
        }
    }
}

impl DisplayOptions {
    /// Get whether the map is visible.
    pub fn show_map(&self) -> bool {
        self.show_map
    }

    /// Set whether the map is visible.
    pub fn set_show_map(&mut self, show: bool) {
        self.show_map = show;
    }

    /// Get whether markers are visible.
    pub fn show_markers(&self) -> bool {
        self.show_markers
    }

    /// Set whether markers are visible.
    pub fn set_show_markers(&mut self, show: bool) {
        self.show_markers = show;
    }

    /// Get whether the offset arrows are visible.
    pub fn show_offset_arrows(&self) -> bool {
        self.show_offset_arrows
    }

    /// Set whether the offset arrows are visible.
    pub fn set_show_offset_arrows(&mut self, show: bool) {
        self.show_offset_arrows = show;
    }
}
