//! Main renderer combining all sub-renderers.
//!
//! The renderer is composed of several specialized components:
//! - [`CameraController`]: Camera and view matrix management
//! - [`DisplayOptions`]: Visibility toggles for rendering elements
//! - [`MapPlaneRenderer`], [`SpriteRenderer`], [`ArrowRenderer`]: scene content

mod camera_controller;
mod display_options;
mod gpu_resources;
mod render_pass;

pub use camera_controller::CameraController;
pub use display_options::DisplayOptions;

use glam::Vec3;
use mapmark_core::ImageData;
use mapmark_core::constants::MARKER_SPRITE_SCALE;

use crate::camera::Camera;
use crate::config::{CameraConfig, DisplayConfig, MapConfig, RendererConfig, ViewportConfig};
use crate::constants::viewport::DEPTH_FORMAT;
use crate::pipeline::RenderTargets;
use crate::sub_renderers::{ArrowRenderer, MapPlaneRenderer, SpriteInstance, SpriteRenderer};
use crate::texture::create_texture_bind_group_layout;

/// Main renderer for the map scene.
pub struct Renderer {
    camera_controller: CameraController,
    display_options: DisplayOptions,

    // Depth/MSAA resources
    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)]
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    texture_bind_group_layout: wgpu::BindGroupLayout,

    // Sub-renderers
    map_renderer: MapPlaneRenderer,
    sprite_renderer: SpriteRenderer,
    arrow_renderer: ArrowRenderer,

    clear_color: wgpu::Color,
    sample_count: u32,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a new renderer with the specified device and configuration.
    ///
    /// The MSAA sample count is fixed for the renderer's lifetime.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let sample_count = config.viewport.sample_count();

        let mut camera_controller = CameraController::new(device, width, height);
        camera_controller.apply_config(&config.camera);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height, sample_count);
        let (msaa_texture, msaa_view) =
            match gpu_resources::create_msaa_texture(device, format, width, height, sample_count) {
                Some((tex, view)) => (Some(tex), Some(view)),
                None => (None, None),
            };

        let texture_bind_group_layout = create_texture_bind_group_layout(device);
        let targets = RenderTargets {
            color: format,
            depth: DEPTH_FORMAT,
            sample_count,
        };

        let map_renderer = MapPlaneRenderer::new(
            device,
            targets,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
            &texture_bind_group_layout,
            config.map.size,
        );

        let sprite_renderer = SpriteRenderer::new(
            device,
            targets,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
            &texture_bind_group_layout,
        );

        let arrow_renderer = ArrowRenderer::new(
            device,
            targets,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
        );

        tracing::info!(width, height, sample_count, ?format, "Renderer created");

        Self {
            camera_controller,
            display_options: DisplayOptions::from(&config.display),

            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,

            texture_bind_group_layout,

            map_renderer,
            sprite_renderer,
            arrow_renderer,

            clear_color: config.viewport.clear_color(),
            sample_count,
            format,
            width,
            height,
        }
    }

    // ========== Camera accessors ==========

    /// Get a reference to the camera.
    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    /// Get a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_controller.camera_mut()
    }

    // ========== Display option accessors ==========

    /// Current visibility toggles.
    pub fn display_options(&self) -> DisplayOptions {
        self.display_options
    }

    /// Set whether the map is visible.
    pub fn set_show_map(&mut self, show: bool) {
        self.display_options.set_show_map(show);
    }

    /// Set whether markers are visible.
    pub fn set_show_markers(&mut self, show: bool) {
        self.display_options.set_show_markers(show);
    }

    /// Set whether offset arrows are visible.
    pub fn set_show_offset_arrows(&mut self, show: bool) {
        self.display_options.set_show_offset_arrows(show);
    }

    // ========== Scene content ==========

    /// Upload the map image onto the plane, downscaled to the device limit.
    pub fn set_map_image(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, image: &ImageData) {
        let image = image.fit_within(device.limits().max_texture_dimension_2d);
        self.map_renderer
            .set_texture(device, queue, &self.texture_bind_group_layout, &image);
    }

    /// Upload the marker sprite image.
    pub fn set_marker_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageData,
    ) {
        let image = image.fit_within(device.limits().max_texture_dimension_2d);
        self.sprite_renderer
            .set_texture(device, queue, &self.texture_bind_group_layout, &image);
    }

    /// Place one sprite per anchor.
    pub fn set_markers(&mut self, queue: &wgpu::Queue, anchors: &[Vec3]) {
        let instances: Vec<SpriteInstance> = anchors
            .iter()
            .map(|&anchor| SpriteInstance::new(anchor, MARKER_SPRITE_SCALE))
            .collect();
        self.sprite_renderer.update_instances(queue, &instances);
    }

    /// Number of sprites currently drawn
    pub fn marker_count(&self) -> u32 {
        self.sprite_renderer.instance_count()
    }

    /// Rebuild the offset arrows from `(anchor, offset_direction)` pairs.
    pub fn update_offset_arrows(&mut self, queue: &wgpu::Queue, arrows: &[(Vec3, Vec3)]) {
        if self.display_options.show_offset_arrows {
            self.arrow_renderer.update(queue, arrows);
        } else {
            self.arrow_renderer.clear();
        }
    }

    // ========== Frame ==========

    /// Resizes the renderer's textures for a new viewport size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera_controller.update_aspect(width, height);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, width, height, self.sample_count);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let (msaa_texture, msaa_view) = match gpu_resources::create_msaa_texture(
            device,
            self.format,
            width,
            height,
            self.sample_count,
        ) {
            Some((tex, view)) => (Some(tex), Some(view)),
            None => (None, None),
        };
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    /// Returns the texture format used by the renderer.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Get the MSAA sample count.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Upload the camera and draw the scene into `view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) {
        self.camera_controller.update(queue);

        let params = render_pass::MainPassParams {
            display_options: &self.display_options,
            map_renderer: &self.map_renderer,
            sprite_renderer: &self.sprite_renderer,
            arrow_renderer: &self.arrow_renderer,
            depth_view: &self.depth_view,
            msaa_view: self.msaa_view.as_ref(),
            clear_color: self.clear_color,
        };
        render_pass::render_main_pass(encoder, view, &params);
    }

    // ========== Configuration ==========

    /// Apply a full renderer configuration.
    ///
    /// MSAA changes take effect only when the renderer is recreated.
    pub fn apply_config(&mut self, config: &RendererConfig, queue: &wgpu::Queue) {
        self.apply_viewport_config(&config.viewport);
        self.apply_camera_config(&config.camera);
        self.apply_map_config(&config.map, queue);
        self.apply_display_config(&config.display);
    }

    /// Apply viewport configuration.
    pub fn apply_viewport_config(&mut self, config: &ViewportConfig) {
        self.clear_color = config.clear_color();
        if config.sample_count() != self.sample_count {
            tracing::warn!(
                requested = config.sample_count(),
                active = self.sample_count,
                "MSAA change requires a restart"
            );
        }
    }

    /// Apply camera configuration.
    pub fn apply_camera_config(&mut self, config: &CameraConfig) {
        self.camera_controller.apply_config(config);
    }

    /// Apply map configuration.
    pub fn apply_map_config(&mut self, config: &MapConfig, queue: &wgpu::Queue) {
        self.map_renderer.set_size(queue, config.size);
    }

    /// Apply visibility configuration.
    pub fn apply_display_config(&mut self, config: &DisplayConfig) {
        self.display_options = DisplayOptions::from(config);
    }
}
