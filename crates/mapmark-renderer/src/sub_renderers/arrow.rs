//! Debug arrows showing each label's offset direction
//!
//! Every marker gets two arrows from its anchor: the label offset direction
//! (red) and the world +X reference axis (green). The offset direction moves
//! with the camera, so the line list is rebuilt every frame.

use glam::Vec3;

use crate::constants::{arrow, instances};
use crate::instanced::InstanceBuffer;
use crate::pipeline::{PipelineDesc, RenderTargets, create_camera_bind_group};
use crate::vertex::PositionColorVertex;

/// Line vertices per arrow: shaft plus two head strokes
const VERTICES_PER_ARROW: usize = 6;

/// Line-list vertices for one arrow.
///
/// A zero or non-finite direction yields no geometry.
pub fn arrow_lines(origin: Vec3, dir: Vec3, length: f32, color: [f32; 3]) -> Vec<PositionColorVertex> {
    let Some(dir) = dir.try_normalize() else {
        return Vec::new();
    };

    let tip = origin + dir * length;
    let head_base = tip - dir * (length * arrow::HEAD_FRACTION);
    let side = dir.any_orthonormal_vector() * (length * arrow::HEAD_WIDTH_FRACTION);

    let v = |p: Vec3| PositionColorVertex {
        position: p.to_array(),
        color,
    };

    vec![
        v(origin),
        v(tip),
        v(tip),
        v(head_base + side),
        v(tip),
        v(head_base - side),
    ]
}

/// Renders the offset and X reference arrows as colored lines
pub struct ArrowRenderer {
    pipeline: wgpu::RenderPipeline,
    vertices: InstanceBuffer<PositionColorVertex>,
    bind_group: wgpu::BindGroup,
    length: f32,
}

impl ArrowRenderer {
    /// Creates a new arrow renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: RenderTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Arrow");

        let pipeline = PipelineDesc {
            label: "Arrow",
            shader: include_str!("../shaders/line.wgsl"),
            bind_group_layouts: &[camera_bind_group_layout],
            vertex_layouts: &[PositionColorVertex::layout()],
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            blend: wgpu::BlendState::ALPHA_BLENDING,
        }
        .build(device, targets);

        let capacity = instances::MAX_SPRITES * 2 * VERTICES_PER_ARROW as u32;
        let vertices = InstanceBuffer::new(device, "Arrow", capacity);

        Self {
            pipeline,
            vertices,
            bind_group,
            length: arrow::LENGTH,
        }
    }

    /// Rebuild arrows from `(anchor, offset_direction)` pairs.
    pub fn update(&mut self, queue: &wgpu::Queue, arrows: &[(Vec3, Vec3)]) {
        let lines = build_arrow_lines(arrows, self.length);
        self.vertices.update(queue, &lines);
    }

    /// Remove all arrows
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Renders the arrow lines.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.vertices.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.slice());
        render_pass.draw(0..self.vertices.count(), 0..1);
    }
}

fn build_arrow_lines(arrows: &[(Vec3, Vec3)], length: f32) -> Vec<PositionColorVertex> {
    let mut lines = Vec::with_capacity(arrows.len() * 2 * VERTICES_PER_ARROW);
    for &(anchor, offset_dir) in arrows {
        lines.extend(arrow_lines(anchor, offset_dir, length, arrow::OFFSET_COLOR));
        lines.extend(arrow_lines(anchor, Vec3::X, length, arrow::X_AXIS_COLOR));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arrow_shaft_has_requested_length() {
        let lines = arrow_lines(Vec3::new(1.0, 0.5, 2.0), Vec3::new(0.0, 3.0, 0.0), 5.0, [1.0; 3]);
        assert_eq!(lines.len(), VERTICES_PER_ARROW);
        let start = Vec3::from(lines[0].position);
        let tip = Vec3::from(lines[1].position);
        assert_relative_eq!(start.distance(tip), 5.0, epsilon = 1e-5);
        assert_relative_eq!(tip.distance(Vec3::new(1.0, 5.5, 2.0)), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_head_strokes_start_at_tip() {
        let lines = arrow_lines(Vec3::ZERO, Vec3::X, 5.0, [0.0; 3]);
        let tip = Vec3::from(lines[1].position);
        assert_eq!(Vec3::from(lines[2].position), tip);
        assert_eq!(Vec3::from(lines[4].position), tip);
        // Head strokes point back toward the origin
        assert!(lines[3].position[0] < tip.x);
        assert!(lines[5].position[0] < tip.x);
    }

    #[test]
    fn test_zero_direction_has_no_geometry() {
        assert!(arrow_lines(Vec3::ZERO, Vec3::ZERO, 5.0, [0.0; 3]).is_empty());
    }

    #[test]
    fn test_each_marker_gets_offset_and_x_arrow() {
        let arrows = [
            (Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(3.0, 0.5, 3.0), Vec3::new(0.0, 0.0, 1.0)),
        ];
        let lines = build_arrow_lines(&arrows, 5.0);
        assert_eq!(lines.len(), 2 * 2 * VERTICES_PER_ARROW);
        assert_eq!(lines[0].color, arrow::OFFSET_COLOR);
        assert_eq!(lines[VERTICES_PER_ARROW].color, arrow::X_AXIS_COLOR);
    }

    #[test]
    fn test_degenerate_offset_keeps_x_arrow() {
        let lines = build_arrow_lines(&[(Vec3::ZERO, Vec3::ZERO)], 5.0);
        assert_eq!(lines.len(), VERTICES_PER_ARROW);
        assert_eq!(lines[0].color, arrow::X_AXIS_COLOR);
    }
}
