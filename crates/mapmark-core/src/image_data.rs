//! Decoded RGBA images ready for GPU upload

use std::borrow::Cow;
use std::path::Path;

/// Tightly packed RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA pixels, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Decode an encoded raster image (PNG or JPEG)
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| AssetError::Decode(e.to_string()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage);
        }
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Read and decode an image file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| AssetError::Io(format!("{}: {}", path.display(), e)))?;
        Self::decode(&bytes)
    }

    /// Downscale so neither side exceeds `max_dimension`, keeping the aspect
    /// ratio. Images that already fit are returned unchanged.
    pub fn fit_within(&self, max_dimension: u32) -> Cow<'_, ImageData> {
        let (width, height) = fit_size(self.width, self.height, max_dimension);
        if (width, height) == (self.width, self.height) {
            return Cow::Borrowed(self);
        }

        let Some(source) =
            image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
        else {
            return Cow::Borrowed(self);
        };
        let resized =
            image::imageops::resize(&source, width, height, image::imageops::FilterType::Triangle);
        tracing::info!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "Downscaled image to fit texture limit"
        );
        Cow::Owned(Self {
            width,
            height,
            pixels: resized.into_raw(),
        })
    }

    /// RGBA value at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Checkerboard stand-in for a missing map texture
    pub fn checkerboard(size: u32, cells: u32, light: [u8; 4], dark: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                    light
                } else {
                    dark
                };
                pixels.extend_from_slice(&color);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Map-pin silhouette stand-in for a missing marker texture.
    ///
    /// A disc in the upper part tapering to a point at the bottom center,
    /// transparent elsewhere.
    pub fn pin(width: u32, height: u32, color: [u8; 4]) -> Self {
        let width = width.max(1);
        let height = height.max(width);
        let w = width as f32;
        let h = height as f32;
        let radius = w * 0.5;
        let (cx, cy) = (w * 0.5, radius);
        let tip = (cx, h);

        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let in_disc = (px - cx).powi(2) + (py - cy).powi(2) <= radius * radius;
                // Triangle from the disc's equator down to the tip
                let in_tail = py >= cy && {
                    let t = (py - cy) / (tip.1 - cy);
                    (px - cx).abs() <= radius * (1.0 - t)
                };
                if in_disc || in_tail {
                    pixels.extend_from_slice(&color);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Largest size with the same aspect ratio whose sides fit `max_dimension`.
pub fn fit_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let shrink = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    (shrink(width), shrink(height))
}

/// Asset loading errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Fetch error: {0}")]
    Fetch(String),
    #[error("Image has no pixels")]
    EmptyImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = std::io::Cursor::new(Vec::new());
        buffer
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("encode png");
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_png(3, 2, [10, 20, 30, 255]);
        let image = ImageData::decode(&bytes).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(image.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(3, 0), None);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ImageData::decode(b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Decode(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker.png");
        std::fs::write(&path, encode_png(118, 144, [255, 0, 0, 255])).unwrap();

        let image = ImageData::load(&path).unwrap();
        assert_eq!((image.width, image.height), (118, 144));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageData::load(dir.path().join("map.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn test_fit_size_keeps_small_images() {
        assert_eq!(fit_size(118, 144, 8192), (118, 144));
        assert_eq!(fit_size(8192, 10, 8192), (8192, 10));
    }

    #[test]
    fn test_fit_size_shrinks_longest_side() {
        assert_eq!(fit_size(20000, 10000, 8192), (8192, 4096));
        assert_eq!(fit_size(2907, 3460, 2048), (1721, 2048));
        assert_eq!(fit_size(30000, 1, 8192), (8192, 1));
    }

    #[test]
    fn test_fit_within_downscales_pixels() {
        let image = ImageData::checkerboard(64, 8, [255; 4], [0, 0, 0, 255]);
        let fitted = image.fit_within(16);
        assert_eq!((fitted.width, fitted.height), (16, 16));
        assert_eq!(fitted.pixels.len(), 16 * 16 * 4);

        assert!(matches!(image.fit_within(64), Cow::Borrowed(_)));
    }

    #[test]
    fn test_checkerboard_alternates() {
        let light = [200, 200, 200, 255];
        let dark = [60, 60, 60, 255];
        let image = ImageData::checkerboard(64, 8, light, dark);
        assert_eq!(image.pixels.len(), 64 * 64 * 4);
        assert_eq!(image.pixel(0, 0), Some(light));
        assert_eq!(image.pixel(8, 0), Some(dark));
        assert_eq!(image.pixel(8, 8), Some(light));
    }

    #[test]
    fn test_pin_silhouette() {
        let color = [220, 50, 50, 255];
        let image = ImageData::pin(32, 40, color);
        assert_eq!((image.width, image.height), (32, 40));
        assert_eq!(image.pixel(16, 16), Some(color));
        assert_eq!(image.pixel(16, 38), Some(color));
        assert_eq!(image.pixel(0, 39), Some([0, 0, 0, 0]));
    }
}
