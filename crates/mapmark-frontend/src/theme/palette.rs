//! Color palette for the UI theme

use egui::Color32;

// =============================================================================
// Background hierarchy (dark to light)
// =============================================================================

/// Base viewport background
pub const BG_BASE: Color32 = Color32::from_rgb(24, 24, 28);
/// Panel background
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 35);
/// Elevated surfaces (popups, context menus)
pub const BG_ELEVATED: Color32 = Color32::from_rgb(38, 38, 44);
/// Input field background
pub const BG_INPUT: Color32 = Color32::from_rgb(45, 45, 52);
/// Hover state background
pub const BG_HOVER: Color32 = Color32::from_rgb(55, 55, 65);

// =============================================================================
// Borders and text
// =============================================================================

/// Subtle panel boundary
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 50, 58);
/// Normal divider line
pub const BORDER_NORMAL: Color32 = Color32::from_rgb(65, 65, 75);

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 230, 235);
/// Secondary text (hints, camera readout)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 170);

/// Primary accent (selection, active)
pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(66, 150, 250);
/// Subtle accent for selection background
pub const ACCENT_SUBTLE: Color32 = Color32::from_rgba_premultiplied(66, 150, 250, 30);

/// Scene loaded
pub const SUCCESS: Color32 = Color32::from_rgb(80, 200, 120);
/// Scene loaded with fallbacks
pub const WARNING: Color32 = Color32::from_rgb(255, 180, 60);

// =============================================================================
// Marker labels
// =============================================================================

/// Label card background, light so it reads over the map
pub const LABEL_BG: Color32 = Color32::from_rgba_premultiplied(245, 245, 240, 235);
/// Label card outline
pub const LABEL_BORDER: Color32 = Color32::from_rgb(120, 120, 130);
/// Label title
pub const LABEL_TITLE: Color32 = Color32::from_rgb(20, 20, 25);
/// Label body
pub const LABEL_BODY: Color32 = Color32::from_rgb(70, 70, 80);
