//! Main render pass execution.

use crate::sub_renderers::{ArrowRenderer, MapPlaneRenderer, SpriteRenderer};

use super::DisplayOptions;

/// Main pass parameters.
pub struct MainPassParams<'a> {
    /// Display options.
    pub display_options: &'a DisplayOptions,
    /// Map plane renderer.
    pub map_renderer: &'a MapPlaneRenderer,
    /// Sprite renderer.
    pub sprite_renderer: &'a SpriteRenderer,
    /// Arrow renderer.
    pub arrow_renderer: &'a ArrowRenderer,
    /// Depth view.
    pub depth_view: &'a wgpu::TextureView,
    /// MSAA view (if MSAA is enabled).
    pub msaa_view: Option<&'a wgpu::TextureView>,
    /// Clear color.
    pub clear_color: wgpu::Color,
}

/// Execute the main render pass: map, then sprites, then arrows.
pub fn render_main_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    params: &MainPassParams<'_>,
) {
    // With MSAA, draw into the multisample target and resolve to `view`
    let (target, resolve_target) = match params.msaa_view {
        Some(msaa_view) => (msaa_view, Some(view)),
        None => (view, None),
    };

    let color_attachment = wgpu::RenderPassColorAttachment {
        view: target,
        resolve_target,
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(params.clear_color),
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    };

    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Main Render Pass"),
        color_attachments: &[Some(color_attachment)],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if params.display_options.show_map {
        params.map_renderer.render(&mut render_pass);
    }

    if params.display_options.show_markers {
        params.sprite_renderer.render(&mut render_pass);
    }

    if params.display_options.show_offset_arrows {
        params.arrow_renderer.render(&mut render_pass);
    }
}
