//! Camera state and its uniform buffer

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::config::CameraConfig;

/// Owns the camera and the GPU uniform every sub-renderer binds at group 0.
pub struct CameraController {
    camera: Camera,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraController {
    /// Creates the controller with a top-down camera for the given viewport.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let camera = Camera::new(aspect_ratio(width, height));

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        Self {
            camera,
            buffer,
            bind_group_layout,
        }
    }

    /// Camera reference
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera reference
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Uniform buffer holding [`crate::camera::CameraUniform`]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Layout of the camera bind group
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Track a new viewport size.
    pub fn update_aspect(&mut self, width: u32, height: u32) {
        self.camera.update_aspect(aspect_ratio(width, height));
    }

    /// Write the current camera matrices to the GPU.
    pub fn update(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.camera.uniform()]));
    }

    /// Apply projection and input settings.
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.camera.set_fov_degrees(config.fov_degrees);
        self.camera.set_near(config.near_plane);
        self.camera.set_far(config.far_plane);
        self.camera.pan_sensitivity = config.pan_sensitivity;
        self.camera.zoom_sensitivity = config.zoom_sensitivity;
        self.camera.orbit_sensitivity = config.orbit_sensitivity;
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_never_divides_by_zero() {
        assert_eq!(aspect_ratio(800, 400), 2.0);
        assert_eq!(aspect_ratio(800, 0), 800.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }
}
