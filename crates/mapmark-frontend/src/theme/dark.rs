//! Dark theme visuals for egui

use egui::{Color32, CornerRadius, Shadow, Stroke, Visuals};

use super::palette;

/// Create dark theme visuals
pub fn visuals() -> Visuals {
    let mut v = Visuals::dark();

    v.panel_fill = palette::BG_PANEL;
    v.window_fill = palette::BG_ELEVATED;
    v.extreme_bg_color = palette::BG_BASE;
    v.faint_bg_color = palette::BG_INPUT;

    v.selection.bg_fill = palette::ACCENT_SUBTLE;
    v.selection.stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);
    v.hyperlink_color = palette::ACCENT_PRIMARY;
    v.override_text_color = Some(palette::TEXT_PRIMARY);

    let radius = CornerRadius::same(4);

    v.widgets.noninteractive.bg_fill = palette::BG_INPUT;
    v.widgets.noninteractive.weak_bg_fill = palette::BG_PANEL;
    v.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette::TEXT_SECONDARY);
    v.widgets.noninteractive.corner_radius = radius;

    v.widgets.inactive.bg_fill = palette::BG_INPUT;
    v.widgets.inactive.weak_bg_fill = palette::BG_INPUT;
    v.widgets.inactive.bg_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.widgets.inactive.fg_stroke = Stroke::new(1.0, palette::TEXT_PRIMARY);
    v.widgets.inactive.corner_radius = radius;

    v.widgets.hovered.bg_fill = palette::BG_HOVER;
    v.widgets.hovered.weak_bg_fill = palette::BG_HOVER;
    v.widgets.hovered.bg_stroke = Stroke::new(1.0, palette::BORDER_NORMAL);
    v.widgets.hovered.fg_stroke = Stroke::new(1.5, palette::TEXT_PRIMARY);
    v.widgets.hovered.corner_radius = radius;

    v.widgets.active.bg_fill = palette::ACCENT_PRIMARY;
    v.widgets.active.weak_bg_fill = palette::BG_HOVER;
    v.widgets.active.bg_stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);
    v.widgets.active.fg_stroke = Stroke::new(2.0, palette::TEXT_PRIMARY);
    v.widgets.active.corner_radius = radius;

    // Context menu
    v.menu_corner_radius = radius;
    v.popup_shadow = Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: Color32::from_black_alpha(60),
    };

    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_are_dark() {
        let v = visuals();
        assert!(v.dark_mode);
        assert_eq!(v.panel_fill, palette::BG_PANEL);
    }
}
