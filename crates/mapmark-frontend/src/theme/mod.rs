//! Theme module for UI styling

mod dark;
pub mod palette;

/// Apply the viewer's dark theme to the egui context
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(dark::visuals());
}

/// Frame drawn around each marker label
pub fn label_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(palette::LABEL_BG)
        .stroke(egui::Stroke::new(1.0, palette::LABEL_BORDER))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .shadow(egui::Shadow {
            offset: [0, 1],
            blur: 4,
            spread: 0,
            color: egui::Color32::from_black_alpha(50),
        })
}
