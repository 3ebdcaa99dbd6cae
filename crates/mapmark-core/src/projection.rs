//! Screen-space label placement
//!
//! Every frame each marker anchor is reprojected into pixel coordinates so
//! its label can follow the camera. The label is lifted above the marker by
//! a pixel offset that grows when the marker is seen from an unfavorable
//! angle.
//!
//! The offset direction is `normalize(cam_to_marker × X)`: a unit vector
//! perpendicular to both the viewing ray and the world X axis. Its `y`
//! component drives the pixel lift:
//!
//! ```text
//! cross.y <  0  =>  up_y = base * (2 - cross.y)
//! cross.y >= 0  =>  up_y = base * (1 + cross.y)
//! ```

use glam::{Mat4, Vec2, Vec3};

use crate::constants::LABEL_BASE_OFFSET;
use crate::marker::{MarkerId, MarkerRecord};

/// Read-only camera snapshot used for projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera eye position in world space
    pub position: Vec3,
    /// Combined projection * view matrix
    pub view_proj: Mat4,
}

impl CameraState {
    pub fn new(position: Vec3, view_proj: Mat4) -> Self {
        Self {
            position,
            view_proj,
        }
    }
}

/// Canvas client size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map normalized device coordinates to pixels (Y grows downward)
    pub fn ndc_to_pixels(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.width,
            (ndc.y * -0.5 + 0.5) * self.height,
        )
    }
}

/// Result of projecting one marker anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Projected pixel x of the displaced anchor
    pub x: f32,
    /// Projected pixel y of the displaced anchor
    pub y: f32,
    /// Pixels the label is lifted above `y`
    pub up_y: f32,
    /// Unit offset direction (zero in the degenerate case)
    pub offset_dir: Vec3,
    /// Whether the displaced anchor lies in front of the camera
    pub in_front: bool,
}

impl LabelPlacement {
    /// Point the label box is centered on
    pub fn label_center(&self) -> Vec2 {
        Vec2::new(self.x, self.y - self.up_y)
    }
}

/// Computes label placements from camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelProjector {
    base_offset: f32,
}

impl Default for LabelProjector {
    fn default() -> Self {
        Self::new(LABEL_BASE_OFFSET)
    }
}

impl LabelProjector {
    /// Create a projector with the given base lift in pixels
    pub fn new(base_offset: f32) -> Self {
        Self { base_offset }
    }

    pub fn base_offset(&self) -> f32 {
        self.base_offset
    }

    /// Unit vector perpendicular to the viewing ray and the world X axis.
    ///
    /// When the ray is parallel to X the cross product vanishes and the
    /// result is the zero vector.
    pub fn offset_direction(anchor: Vec3, camera_position: Vec3) -> Vec3 {
        let cam_to_marker = anchor - camera_position;
        cam_to_marker.cross(Vec3::X).normalize_or_zero()
    }

    /// Pixel lift for a given offset direction
    pub fn lift(&self, offset_dir: Vec3) -> f32 {
        if offset_dir.y < 0.0 {
            self.base_offset * (2.0 - offset_dir.y)
        } else {
            self.base_offset * (1.0 + offset_dir.y)
        }
    }

    /// Project a single anchor.
    pub fn project(&self, anchor: Vec3, camera: &CameraState, viewport: Viewport) -> LabelPlacement {
        let offset_dir = Self::offset_direction(anchor, camera.position);
        let up_y = self.lift(offset_dir);

        let clip = camera.view_proj * (anchor + offset_dir).extend(1.0);
        let in_front = clip.w > f32::EPSILON;
        let ndc = if clip.w.abs() > f32::EPSILON {
            Vec2::new(clip.x, clip.y) / clip.w
        } else {
            Vec2::new(clip.x, clip.y)
        };
        let pixels = viewport.ndc_to_pixels(ndc);

        LabelPlacement {
            x: pixels.x,
            y: pixels.y,
            up_y,
            offset_dir,
            in_front,
        }
    }

    /// Project every marker, preserving order
    pub fn project_all(
        &self,
        markers: &[MarkerRecord],
        camera: &CameraState,
        viewport: Viewport,
    ) -> Vec<(MarkerId, LabelPlacement)> {
        markers
            .iter()
            .map(|m| (m.id, self.project(m.anchor(), camera, viewport)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::LabelContent;
    use approx::assert_relative_eq;

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    fn camera(eye: Vec3, target: Vec3, up: Vec3) -> CameraState {
        let view = Mat4::look_at_rh(eye, target, up);
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), WIDTH / HEIGHT, 0.1, 1000.0);
        CameraState::new(eye, proj * view)
    }

    fn viewport() -> Viewport {
        Viewport::new(WIDTH, HEIGHT)
    }

    #[test]
    fn test_ndc_to_pixels_corners() {
        let vp = viewport();
        assert_eq!(vp.ndc_to_pixels(Vec2::new(-1.0, 1.0)), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_pixels(Vec2::new(1.0, -1.0)), Vec2::new(WIDTH, HEIGHT));
        assert_eq!(
            vp.ndc_to_pixels(Vec2::ZERO),
            Vec2::new(WIDTH / 2.0, HEIGHT / 2.0)
        );
    }

    #[test]
    fn test_top_down_view() {
        let cam = camera(Vec3::new(0.0, 60.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
        let placement = LabelProjector::default().project(Vec3::new(0.0, 0.5, 0.0), &cam, viewport());

        assert_relative_eq!(placement.offset_dir.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(placement.offset_dir.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(placement.up_y, 80.0, epsilon = 1e-4);
        assert_relative_eq!(placement.x, WIDTH / 2.0, epsilon = 1e-3);
        // +Z points down the screen when the camera's up vector is -Z
        assert!(placement.y > HEIGHT / 2.0);
        assert!(placement.in_front);
    }

    #[test]
    fn test_camera_in_front_of_marker_doubles_base() {
        // Camera south of the marker: the offset direction tilts downward.
        let cam = camera(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO, Vec3::Y);
        let placement = LabelProjector::default().project(Vec3::new(0.0, 0.5, 0.0), &cam, viewport());

        let expected_y = -20.0 / (20.0_f32 * 20.0 + 9.5 * 9.5).sqrt();
        assert_relative_eq!(placement.offset_dir.y, expected_y, epsilon = 1e-5);
        assert_relative_eq!(placement.up_y, 80.0 * (2.0 - expected_y), epsilon = 1e-3);
        assert!(placement.up_y > 160.0);
    }

    #[test]
    fn test_camera_behind_marker_adds_to_base() {
        let cam = camera(Vec3::new(0.0, 10.0, -20.0), Vec3::ZERO, Vec3::Y);
        let placement = LabelProjector::default().project(Vec3::new(0.0, 0.5, 0.0), &cam, viewport());

        let expected_y = 20.0 / (20.0_f32 * 20.0 + 9.5 * 9.5).sqrt();
        assert_relative_eq!(placement.offset_dir.y, expected_y, epsilon = 1e-5);
        assert_relative_eq!(placement.up_y, 80.0 * (1.0 + expected_y), epsilon = 1e-3);
    }

    #[test]
    fn test_offset_direction_is_unit_and_perpendicular() {
        let anchor = Vec3::new(3.0, 0.5, -7.0);
        let eye = Vec3::new(-12.0, 25.0, 14.0);
        let dir = LabelProjector::offset_direction(anchor, eye);

        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(dir.dot(Vec3::X), 0.0, epsilon = 1e-6);
        assert_relative_eq!(dir.dot(anchor - eye), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_lift_is_continuous_at_horizontal() {
        let projector = LabelProjector::default();
        assert_relative_eq!(projector.lift(Vec3::new(0.0, 0.0, 1.0)), 80.0);
        assert_relative_eq!(projector.lift(Vec3::new(0.0, 1.0, 0.0)), 160.0);
        assert_relative_eq!(projector.lift(Vec3::new(0.0, -1.0, 0.0)), 240.0);
    }

    #[test]
    fn test_degenerate_ray_parallel_to_x() {
        let anchor = Vec3::new(0.0, 0.5, 0.0);
        let cam = camera(Vec3::new(-10.0, 0.5, 0.0), anchor, Vec3::Y);
        let placement = LabelProjector::default().project(anchor, &cam, viewport());

        assert_eq!(placement.offset_dir, Vec3::ZERO);
        assert_relative_eq!(placement.up_y, 80.0);
        assert!(placement.x.is_finite() && placement.y.is_finite());
        assert_relative_eq!(placement.x, WIDTH / 2.0, epsilon = 1e-3);
        assert_relative_eq!(placement.y, HEIGHT / 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_anchor_behind_camera() {
        let cam = camera(Vec3::new(0.0, 10.0, 20.0), Vec3::new(0.0, 10.0, 40.0), Vec3::Y);
        let placement = LabelProjector::default().project(Vec3::new(0.0, 0.5, 0.0), &cam, viewport());
        assert!(!placement.in_front);
    }

    #[test]
    fn test_label_center_applies_lift() {
        let placement = LabelPlacement {
            x: 100.0,
            y: 300.0,
            up_y: 80.0,
            offset_dir: Vec3::Z,
            in_front: true,
        };
        assert_eq!(placement.label_center(), Vec2::new(100.0, 220.0));
    }

    #[test]
    fn test_custom_base_offset() {
        let projector = LabelProjector::new(40.0);
        assert_relative_eq!(projector.lift(Vec3::Z), 40.0);
    }

    #[test]
    fn test_project_all_follows_camera() {
        let markers = vec![
            MarkerRecord::new(Vec3::new(-5.0, 0.5, 0.0), LabelContent::default()),
            MarkerRecord::new(Vec3::new(5.0, 0.5, 0.0), LabelContent::default()),
        ];
        let projector = LabelProjector::default();
        let cam = camera(Vec3::new(0.0, 60.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);

        let placements = projector.project_all(&markers, &cam, viewport());
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].0, markers[0].id);
        assert!(placements[0].1.x < placements[1].1.x);

        // Orbiting the camera moves the labels
        let moved = camera(Vec3::new(20.0, 40.0, 20.0), Vec3::ZERO, Vec3::Y);
        let after = projector.project_all(&markers, &moved, viewport());
        assert_ne!(placements[0].1, after[0].1);
    }
}
