//! Texture loading and raster operations.

use crate::error::Result;
use image::ImageEncoder;
use uuid::Uuid;

/// Raw texture data decoded to RGBA8.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Check if this texture has any pixel below full opacity.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks(4).any(|pixel| pixel[3] < 255)
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Resize so that neither edge exceeds `max_dim`, preserving aspect ratio.
    ///
    /// Uses Lanczos3 resampling. Textures already within bounds are returned
    /// unchanged.
    pub fn resize_to_fit(&self, max_dim: u32) -> TextureData {
        if self.width <= max_dim && self.height <= max_dim {
            return self.clone();
        }

        let Some(img) = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
        else {
            // Pixel buffer doesn't match the declared dimensions; leave as-is.
            return self.clone();
        };

        let scale = max_dim as f32 / self.width.max(self.height) as f32;
        let new_width = ((self.width as f32 * scale).round() as u32).max(1);
        let new_height = ((self.height as f32 * scale).round() as u32).max(1);

        let resized =
            image::imageops::resize(&img, new_width, new_height, image::imageops::FilterType::Lanczos3);

        TextureData::new(new_width, new_height, resized.into_raw())
    }

    /// Encode the texture as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(bytes)
    }
}

/// Load a texture from encoded image bytes (PNG or any enabled format).
pub fn load_texture_from_bytes(data: &[u8]) -> Result<TextureData> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData::new(width, height, rgba.into_raw()))
}

/// Trait for texture content stores.
///
/// The exporter fetches raw images through this boundary; implement it over
/// whatever asset backend holds the texture data.
pub trait TextureSource {
    /// Fetch the raw image for a texture id.
    ///
    /// Returns `None` when the asset is missing or unreadable; the exporter
    /// degrades the referencing materials to untextured.
    fn load_texture(&self, id: Uuid) -> Option<TextureData>;
}
