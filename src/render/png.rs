//! PNG output for rendered artworks.
//!
//! Encodes image surfaces to PNG files with optional integer scaling.

use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::{RaError, Result};

use super::ImageSurface;

/// Write a rendered surface to a PNG file.
///
/// # Arguments
///
/// * `surface` - The rendered surface to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(surface: &ImageSurface, path: &Path, scale: u32) -> Result<()> {
    let scaled = scale_image(surface.image(), scale);

    scaled
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| RaError::Encode {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}

/// Scale an image by an integer factor.
///
/// Uses nearest-neighbour scaling so blocks stay crisp.
pub fn scale_image(image: &RgbImage, scale: u32) -> RgbImage {
    let scale = scale.max(1); // Minimum scale of 1
    if scale == 1 {
        return image.clone();
    }

    let mut scaled = RgbImage::new(image.width() * scale, image.height() * scale);

    for (x, y, pixel) in image.enumerate_pixels() {
        // Fill scaled pixels
        for sy in 0..scale {
            for sx in 0..scale {
                scaled.put_pixel(x * scale + sx, y * scale + sy, *pixel);
            }
        }
    }

    scaled
}
