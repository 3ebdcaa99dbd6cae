//! Main application module

use std::sync::Arc;

use parking_lot::Mutex;

use crate::assets;
use crate::config::{ConfigManager, SharedConfig, create_shared_config};
use crate::panels::{ViewportPanel, render_status_bar};
use crate::state::{
    AppState, SceneLoader, SharedAppState, SharedViewportState, ViewportState, create_shared_state,
};
use crate::theme;

/// Main application
///
/// Each frame polls the scene loader, then draws the status bar and the
/// viewport. The viewport renders the scene and places the labels.
pub struct MapViewerApp {
    app_state: SharedAppState,
    config: SharedConfig,
    viewport_state: Option<SharedViewportState>,
    viewport_panel: ViewportPanel,
    scene: SceneLoader,
}

impl MapViewerApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let manager = ConfigManager::load();
        let app_config = manager.config().clone();
        let config = create_shared_config(manager);

        theme::apply_theme(&cc.egui_ctx);

        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let device = Arc::new(render_state.device.clone());
            let queue = Arc::new(render_state.queue.clone());
            let format = render_state.target_format;

            Arc::new(Mutex::new(ViewportState::new(
                device,
                queue,
                format,
                &app_config.renderer,
            )))
        });
        if viewport_state.is_none() {
            tracing::warn!("No wgpu render state, the scene will not be drawn");
        }

        let resources_dir = app_config.resources_dir.clone();
        let scene = SceneLoader::new(
            app_config.placement(),
            Box::new(move |name| assets::request_image(&resources_dir, name)),
        );

        let app_state = create_shared_state(AppState::with_base_offset(
            app_config.labels.base_offset,
        ));

        tracing::info!(resources = %app_config.resources_dir, "Viewer started");

        Self {
            app_state,
            config,
            viewport_state,
            viewport_panel: ViewportPanel::new(),
            scene,
        }
    }

    /// Advance the loading chain and publish its results
    fn poll_scene(&mut self) {
        let placed = match &self.viewport_state {
            Some(vp) => self.scene.poll(&mut *vp.lock()),
            None => self.scene.poll(&mut NoTarget),
        };

        let mut app = self.app_state.lock();
        if let Some(markers) = placed {
            app.markers = markers;
        }
        app.status = self.scene.status();
    }
}

/// Scene sink used when there is no GPU to upload to
struct NoTarget;

impl crate::state::SceneTarget for NoTarget {
    fn set_map_image(&mut self, _image: &mapmark_core::ImageData) {}
    fn set_marker_image(&mut self, _image: &mapmark_core::ImageData) {}
    fn set_markers(&mut self, _markers: &mapmark_core::MarkerSet) {}
}

impl eframe::App for MapViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.poll_scene();

        render_status_bar(ctx, &self.app_state, self.viewport_state.as_ref());

        let render_state = frame.wgpu_render_state();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::palette::BG_BASE))
            .show(ctx, |ui| match (render_state, &self.viewport_state) {
                (Some(render_state), Some(viewport_state)) => {
                    self.viewport_panel.ui_with_render_context(
                        ui,
                        &self.app_state,
                        &self.config,
                        render_state,
                        viewport_state,
                    );
                }
                _ => self.viewport_panel.ui(ui),
            });

        // Labels follow the camera every frame
        ctx.request_repaint();
    }
}
