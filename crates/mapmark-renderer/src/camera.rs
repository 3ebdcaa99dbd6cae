//! Orbit camera for the map viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use mapmark_core::CameraState;

use crate::constants::camera as constants;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// Orbit camera (Y-up, orbiting around `target`)
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    // Orbit state
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    // Input scaling
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub orbit_sensitivity: f32,
}

impl Camera {
    /// Create a camera looking straight down at the map
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: constants::DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: constants::DEFAULT_NEAR,
            far: constants::DEFAULT_FAR,
            yaw: 0.0,
            pitch: constants::MAX_PITCH_DEGREES.to_radians(),
            distance: constants::DEFAULT_DISTANCE,
            pan_sensitivity: constants::PAN_SCALE,
            zoom_sensitivity: constants::ZOOM_SCALE,
            orbit_sensitivity: constants::ORBIT_SCALE,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            constants::MIN_PITCH_DEGREES.to_radians(),
            constants::MAX_PITCH_DEGREES.to_radians(),
        );
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * self.pan_sensitivity;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * self.zoom_sensitivity))
            .clamp(constants::MIN_DISTANCE, constants::MAX_DISTANCE);
        self.update_position_from_orbit();
    }

    /// Set field of view in degrees
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.clamp(10.0, 120.0).to_radians();
    }

    /// Get field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    /// Set near clipping plane
    pub fn set_near(&mut self, near: f32) {
        self.near = near.max(0.001);
    }

    /// Set far clipping plane
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near + 1.0);
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Back to the initial top-down view of the whole map
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.distance = constants::DEFAULT_DISTANCE;
        self.set_top_view();
    }

    /// Frame a square map of the given half extent
    pub fn fit_map(&mut self, half_extent: f32) {
        self.target = Vec3::ZERO;
        let half_fov = (self.fov * 0.5).tan().max(f32::EPSILON);
        let fit = half_extent / (half_fov * self.aspect.min(1.0));
        self.distance = fit
            .max(constants::MIN_DISTANCE)
            .min(constants::MAX_DISTANCE);
        self.update_position_from_orbit();
    }

    /// Set to top view
    pub fn set_top_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = constants::MAX_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Set to a 45 degree oblique view
    pub fn set_oblique_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 45.0_f32.to_radians();
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Snapshot used by the label projector
    pub fn state(&self) -> CameraState {
        CameraState::new(self.position, self.projection_matrix() * self.view_matrix())
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_camera_looks_down_from_above() {
        let camera = Camera::new(16.0 / 9.0);
        assert_relative_eq!(camera.position.y, 60.0, epsilon = 0.01);
        assert_relative_eq!(camera.position.x, 0.0, epsilon = 1e-4);
        assert!(camera.position.z.abs() < 0.2);
        assert_relative_eq!(camera.fov_degrees(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.7, -0.8);
        assert_relative_eq!(
            (camera.position - camera.target).length(),
            camera.distance,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= constants::MAX_PITCH_DEGREES.to_radians() + 1e-6);
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch >= constants::MIN_PITCH_DEGREES.to_radians() - 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(1.0);
        for _ in 0..200 {
            camera.zoom(5.0);
        }
        assert!(camera.distance >= constants::MIN_DISTANCE);
        for _ in 0..200 {
            camera.zoom(-5.0);
        }
        assert!(camera.distance <= constants::MAX_DISTANCE);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let mut camera = Camera::new(1.0);
        camera.set_oblique_view();
        let offset_before = camera.position - camera.target;
        camera.pan(100.0, 0.0);
        assert_ne!(camera.target, Vec3::ZERO);
        let offset_after = camera.position - camera.target;
        assert_relative_eq!(offset_before.x, offset_after.x, epsilon = 1e-3);
        assert_relative_eq!(offset_before.y, offset_after.y, epsilon = 1e-3);
        assert_relative_eq!(offset_before.z, offset_after.z, epsilon = 1e-3);
    }

    #[test]
    fn test_reset_restores_top_view() {
        let mut camera = Camera::new(1.0);
        camera.orbit(1.0, -0.5);
        camera.pan(30.0, 30.0);
        camera.zoom(2.0);
        camera.reset();
        assert_eq!(camera.target, Vec3::ZERO);
        assert_relative_eq!(camera.position.y, 60.0, epsilon = 0.01);
    }

    #[test]
    fn test_state_projects_target_to_center() {
        let camera = Camera::new(4.0 / 3.0);
        let state = camera.state();
        assert_eq!(state.position, camera.position);
        let ndc = state.view_proj.project_point3(camera.target);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_aspect_ignored() {
        let mut camera = Camera::new(2.0);
        camera.update_aspect(0.0);
        camera.update_aspect(f32::NAN);
        assert_eq!(camera.aspect, 2.0);
    }
}
