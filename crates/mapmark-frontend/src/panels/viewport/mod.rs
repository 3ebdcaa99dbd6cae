//! 3D Viewport panel

mod labels;

use mapmark_core::Viewport;

use crate::config::SharedConfig;
use crate::state::{SharedAppState, SharedViewportState};

pub use labels::render_labels;

/// Pixels of scroll per zoom step
const SCROLL_ZOOM_SCALE: f32 = 0.01;

/// 3D viewport panel
pub struct ViewportPanel;

impl ViewportPanel {
    pub fn new() -> Self {
        Self
    }

    /// Fallback when no render context
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(30, 30, 30));
        painter.text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D Viewport\n(WebGPU not available)",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
    }

    /// Render the scene, handle camera input and place the labels.
    pub fn ui_with_render_context(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        config: &SharedConfig,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        self.toolbar(ui, config, viewport_state);

        // Main viewport area
        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        // Project labels with the same camera the frame is rendered with
        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);

            let camera = state.renderer.camera().state();
            let viewport = Viewport::new(available_size.x, available_size.y);
            let arrows = {
                let mut app = app_state.lock();
                app.project_labels(&camera, viewport);
                app.offset_arrows()
            };
            state.update_offset_arrows(&arrows);

            state.render();
            tex_id
        };

        // Display the rendered texture
        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            ))
            .sense(egui::Sense::click_and_drag()),
        );

        self.handle_camera_input(ui, &response, viewport_state);

        {
            let app = app_state.lock();
            let cfg = config.read();
            render_labels(
                ui.ctx(),
                response.rect,
                &app.markers,
                app.labels(),
                &cfg.config().labels,
            );
        }
    }

    fn toolbar(
        &mut self,
        ui: &mut egui::Ui,
        config: &SharedConfig,
        viewport_state: &SharedViewportState,
    ) {
        ui.horizontal(|ui| {
            ui.label("View:");
            let mut state = viewport_state.lock();
            if ui.button("Top").clicked() {
                state.renderer.camera_mut().set_top_view();
            }
            if ui.button("Oblique").clicked() {
                state.renderer.camera_mut().set_oblique_view();
            }
            if ui.button("Fit Map").clicked() {
                let half = config.read().config().renderer.map.size * 0.5;
                state.renderer.camera_mut().fit_map(half);
            }
            if ui.button("Reset").clicked() {
                state.renderer.camera_mut().reset();
            }

            ui.separator();

            let display = state.renderer.display_options();
            let mut show_map = display.show_map();
            let mut show_markers = display.show_markers();
            let mut show_arrows = display.show_offset_arrows();
            if ui.checkbox(&mut show_map, "Map").changed() {
                state.renderer.set_show_map(show_map);
                config.write().config_mut().renderer.display.show_map = show_map;
            }
            if ui.checkbox(&mut show_markers, "Markers").changed() {
                state.renderer.set_show_markers(show_markers);
                config.write().config_mut().renderer.display.show_markers = show_markers;
            }
            if ui.checkbox(&mut show_arrows, "Arrows").changed() {
                state.renderer.set_show_offset_arrows(show_arrows);
                config.write().config_mut().renderer.display.show_offset_arrows = show_arrows;
            }
            drop(state);

            let mut cfg = config.write();
            ui.checkbox(&mut cfg.config_mut().labels.visible, "Labels");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reset Settings").clicked() {
                    cfg.reset_to_defaults();
                    viewport_state.lock().apply_config(&cfg.config().renderer);
                    tracing::info!("Settings reset to defaults");
                }
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Save Settings").clicked() {
                    match cfg.save() {
                        Ok(()) => tracing::info!("Settings saved"),
                        Err(e) => tracing::error!("Failed to save settings: {}", e),
                    }
                }
            });
        });
    }

    fn handle_camera_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        viewport_state: &SharedViewportState,
    ) {
        let mut vp_state = viewport_state.lock();
        let camera = vp_state.renderer.camera_mut();

        // Left drag orbits, right or middle drag pans
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            let sensitivity = camera.orbit_sensitivity;
            if ui.input(|i| i.modifiers.shift) {
                camera.pan(delta.x, delta.y);
            } else {
                camera.orbit(-delta.x * sensitivity, delta.y * sensitivity);
            }
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            camera.pan(delta.x, delta.y);
        }

        // Zoom with scroll
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                camera.zoom(scroll_delta * SCROLL_ZOOM_SCALE);
            }
        }

        // Context menu
        response.context_menu(|ui| {
            let camera = vp_state.renderer.camera_mut();
            if ui.button("Reset View").clicked() {
                camera.reset();
                ui.close();
            }
            ui.separator();
            if ui.button("Top View").clicked() {
                camera.set_top_view();
                ui.close();
            }
            if ui.button("Oblique View").clicked() {
                camera.set_oblique_view();
                ui.close();
            }
        });
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}
