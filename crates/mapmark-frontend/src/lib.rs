//! Map marker viewer frontend
//!
//! egui application that shows a textured map plane with marker sprites and
//! keeps an HTML-style label floating above each marker.

pub mod app;
pub mod assets;
pub mod config;
pub mod panels;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::MapViewerApp;
pub use config::{AppConfig, ConfigManager, LabelConfig, SharedConfig};
pub use state::{AppState, SceneLoader, SceneStatus, SharedAppState};
