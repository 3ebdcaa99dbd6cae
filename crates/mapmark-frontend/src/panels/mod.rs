//! UI panels

mod status_bar;
mod viewport;

pub use status_bar::render_status_bar;
pub use viewport::ViewportPanel;
