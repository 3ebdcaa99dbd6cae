//! Viewport rendering state

use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;

use mapmark_core::{ImageData, MarkerSet};
use mapmark_renderer::{Renderer, RendererConfig};

use super::scene::SceneTarget;

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    render_texture: Option<RenderTexture>,
}

/// Shared viewport state
pub type SharedViewportState = Arc<Mutex<ViewportState>>;

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600, config);
        Self {
            renderer,
            device,
            queue,
            render_texture: None,
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return rt.egui_texture_id;
        }

        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Register with egui
        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        // Render targets and camera aspect follow the panel size
        self.renderer.resize(&self.device, width, height);
        tracing::debug!(width, height, "Viewport texture resized");

        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        egui_texture_id
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer.render(&mut encoder, &rt.view, &self.queue);

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Point the debug arrows along each label's current offset direction
    pub fn update_offset_arrows(&mut self, arrows: &[(Vec3, Vec3)]) {
        self.renderer.update_offset_arrows(&self.queue, arrows);
    }

    /// Apply renderer settings
    pub fn apply_config(&mut self, config: &RendererConfig) {
        self.renderer.apply_config(config, &self.queue);
    }
}

impl SceneTarget for ViewportState {
    fn set_map_image(&mut self, image: &ImageData) {
        self.renderer.set_map_image(&self.device, &self.queue, image);
    }

    fn set_marker_image(&mut self, image: &ImageData) {
        self.renderer
            .set_marker_image(&self.device, &self.queue, image);
    }

    fn set_markers(&mut self, markers: &MarkerSet) {
        self.renderer.set_markers(&self.queue, &markers.anchors());
    }
}
