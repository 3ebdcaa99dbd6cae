//! Textured map plane renderer

use mapmark_core::ImageData;
use wgpu::util::DeviceExt;

use crate::pipeline::{PipelineDesc, RenderTargets, create_camera_bind_group};
use crate::texture::GpuTexture;
use crate::vertex::TexturedVertex;

/// Vertices and indices of a square plane on XZ, centered at the origin.
///
/// The image top edge lies at `z = -size / 2`, so the map reads upright from
/// the default top-down camera. Triangles wind counter-clockwise seen from +Y.
pub fn plane_geometry(size: f32) -> ([TexturedVertex; 4], [u16; 6]) {
    let h = size * 0.5;
    let vertices = [
        TexturedVertex {
            position: [-h, 0.0, -h],
            uv: [0.0, 0.0],
        },
        TexturedVertex {
            position: [-h, 0.0, h],
            uv: [0.0, 1.0],
        },
        TexturedVertex {
            position: [h, 0.0, h],
            uv: [1.0, 1.0],
        },
        TexturedVertex {
            position: [h, 0.0, -h],
            uv: [1.0, 0.0],
        },
    ];
    (vertices, [0, 1, 2, 0, 2, 3])
}

/// Renders the map image on a flat plane facing +Y
pub struct MapPlaneRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture: Option<GpuTexture>,
    size: f32,
}

impl MapPlaneRenderer {
    /// Creates a new map plane renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        size: f32,
    ) -> Self {
        let camera_bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Map Plane");

        let pipeline = PipelineDesc {
            label: "Map Plane",
            shader: include_str!("../shaders/map_plane.wgsl"),
            bind_group_layouts: &[camera_bind_group_layout, texture_bind_group_layout],
            vertex_layouts: &[TexturedVertex::layout()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            blend: wgpu::BlendState::REPLACE,
        }
        .build(device, targets);

        let (vertices, indices) = plane_geometry(size);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Map Plane Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Map Plane Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            camera_bind_group,
            texture: None,
            size,
        }
    }

    /// Upload the map image. Replaces any previous texture.
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &ImageData,
    ) {
        self.texture = Some(GpuTexture::from_image(device, queue, layout, image, "Map"));
    }

    /// Resize the plane in place.
    pub fn set_size(&mut self, queue: &wgpu::Queue, size: f32) {
        if size <= 0.0 || size == self.size {
            return;
        }
        let (vertices, _) = plane_geometry(size);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.size = size;
    }

    /// Draws the plane. Nothing is drawn until a texture is set.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(texture) = &self.texture else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, texture.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..6, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_plane_spans_size_on_xz() {
        let (vertices, _) = plane_geometry(40.0);
        for v in &vertices {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[0].abs(), 20.0);
            assert_eq!(v.position[2].abs(), 20.0);
        }
    }

    #[test]
    fn test_image_top_edge_is_far_side() {
        let (vertices, _) = plane_geometry(40.0);
        for v in &vertices {
            if v.uv[1] == 0.0 {
                assert_eq!(v.position[2], -20.0);
            } else {
                assert_eq!(v.position[2], 20.0);
            }
            // u runs with +X
            assert_eq!(v.uv[0] == 0.0, v.position[0] < 0.0);
        }
    }

    #[test]
    fn test_triangles_face_up() {
        let (vertices, indices) = plane_geometry(40.0);
        for tri in indices.chunks(3) {
            let a = Vec3::from(vertices[tri[0] as usize].position);
            let b = Vec3::from(vertices[tri[1] as usize].position);
            let c = Vec3::from(vertices[tri[2] as usize].position);
            let normal = (b - a).cross(c - a);
            assert!(normal.y > 0.0);
        }
    }
}
