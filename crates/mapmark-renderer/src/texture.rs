//! GPU textures for the map and marker images

use mapmark_core::ImageData;

use crate::constants::{map, sprite};

/// Create the bind group layout shared by textured pipelines (group 1).
pub fn create_texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Uploaded texture with its sampler bind group
pub struct GpuTexture {
    #[allow(dead_code)] // Held for GPU resource lifetime
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuTexture {
    /// Upload an RGBA image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &ImageData,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{} Texture", label)),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // egui targets are not sRGB, so texels pass through unconverted
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Texture Bind Group", label)),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        tracing::debug!(
            label,
            width = image.width,
            height = image.height,
            "Uploaded texture"
        );

        Self {
            texture,
            bind_group,
        }
    }

    /// Bind group for group 1
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Checkerboard used when the map image cannot be loaded
pub fn fallback_map_image() -> ImageData {
    ImageData::checkerboard(
        map::FALLBACK_SIZE,
        map::FALLBACK_CELLS,
        map::FALLBACK_LIGHT,
        map::FALLBACK_DARK,
    )
}

/// Pin silhouette used when the marker image cannot be loaded
pub fn fallback_marker_image() -> ImageData {
    let (width, height) = sprite::FALLBACK_SIZE;
    ImageData::pin(width, height, sprite::FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_map_is_square() {
        let image = fallback_map_image();
        assert_eq!(image.width, image.height);
        assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
    }

    #[test]
    fn test_fallback_marker_matches_sprite_ratio() {
        let image = fallback_marker_image();
        let [w, h] = mapmark_core::constants::MARKER_SPRITE_SCALE;
        assert!((image.height as f32 / image.width as f32 - h / w).abs() < 0.02);
    }
}
