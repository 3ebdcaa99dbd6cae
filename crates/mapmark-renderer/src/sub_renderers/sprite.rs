//! Marker sprite renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use mapmark_core::ImageData;
use wgpu::util::DeviceExt;

use crate::constants::instances;
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineDesc, RenderTargets, create_camera_bind_group};
use crate::texture::GpuTexture;
use crate::vertex::CornerVertex;

const QUAD_CORNERS: [CornerVertex; 4] = [
    CornerVertex {
        corner: [-0.5, -0.5],
    },
    CornerVertex {
        corner: [0.5, -0.5],
    },
    CornerVertex {
        corner: [0.5, 0.5],
    },
    CornerVertex {
        corner: [-0.5, 0.5],
    },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Sprite instance data - passed as vertex instance
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Sprite center in world space.
    pub position: [f32; 3],
    /// Sprite width and height in world units.
    pub scale: [f32; 2],
}

impl SpriteInstance {
    /// Creates a new sprite instance.
    pub fn new(position: Vec3, scale: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            scale,
        }
    }
}

impl Default for SpriteInstance {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: mapmark_core::constants::MARKER_SPRITE_SCALE,
        }
    }
}

/// Draws every marker as a textured quad that always faces the camera
pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instances: InstanceBuffer<SpriteInstance>,
    camera_bind_group: wgpu::BindGroup,
    texture: Option<GpuTexture>,
}

impl SpriteRenderer {
    /// Creates a new sprite renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let camera_bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Sprite");

        // Instance layout: position (Float32x3) + scale (Float32x2)
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        };

        let pipeline = PipelineDesc {
            label: "Sprite",
            shader: include_str!("../shaders/sprite.wgsl"),
            bind_group_layouts: &[camera_bind_group_layout, texture_bind_group_layout],
            vertex_layouts: &[CornerVertex::layout(), instance_layout],
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            blend: wgpu::BlendState::ALPHA_BLENDING,
        }
        .build(device, targets);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instances = InstanceBuffer::new(device, "Sprite", instances::MAX_SPRITES);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instances,
            camera_bind_group,
            texture: None,
        }
    }

    /// Upload the marker image. Replaces any previous texture.
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &ImageData,
    ) {
        self.texture = Some(GpuTexture::from_image(device, queue, layout, image, "Marker"));
    }

    /// Update sprite instances
    pub fn update_instances(&mut self, queue: &wgpu::Queue, instances: &[SpriteInstance]) {
        self.instances.update(queue, instances);
    }

    /// Number of sprites that will be drawn
    pub fn instance_count(&self) -> u32 {
        self.instances.count()
    }

    /// Renders all sprite instances.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(texture) = &self.texture else {
            return;
        };
        if self.instances.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, texture.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.slice());
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.instances.count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 20);
    }

    #[test]
    fn test_default_instance_uses_marker_scale() {
        let instance = SpriteInstance::default();
        assert_eq!(instance.scale, [1.0, 1.22]);
    }

    #[test]
    fn test_quad_is_centered() {
        let sum = QUAD_CORNERS
            .iter()
            .fold([0.0f32; 2], |acc, v| [acc[0] + v.corner[0], acc[1] + v.corner[1]]);
        assert_eq!(sum, [0.0, 0.0]);
    }
}
