//! Bottom status bar

use crate::state::{SceneStatus, SharedAppState, SharedViewportState};
use crate::theme::palette;

/// Show loading progress, marker and sprite counts and camera position
pub fn render_status_bar(
    ctx: &egui::Context,
    app_state: &SharedAppState,
    viewport_state: Option<&SharedViewportState>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let (status, marker_count) = {
                let app = app_state.lock();
                (app.status.clone(), app.markers.len())
            };

            let color = match status {
                SceneStatus::Ready => palette::SUCCESS,
                SceneStatus::Degraded(_) => palette::WARNING,
                SceneStatus::LoadingMap | SceneStatus::LoadingMarker => palette::TEXT_SECONDARY,
            };
            if !status.is_finished() {
                ui.spinner();
            }
            ui.colored_label(color, status.message());

            ui.separator();
            ui.label(format!("Markers: {}", marker_count));

            if let Some(vp) = viewport_state {
                let (sprites, position) = {
                    let vp = vp.lock();
                    (vp.renderer.marker_count(), vp.renderer.camera().position)
                };
                ui.separator();
                ui.label(format!("Sprites: {}", sprites));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "Camera ({:.1}, {:.1}, {:.1})",
                            position.x, position.y, position.z
                        ))
                        .color(palette::TEXT_SECONDARY),
                    );
                });
            }
        });
    });
}
