//! Render targets.
//!
//! A [`Surface`] is a square grid of quantized colours that the rasterizer
//! paints block by block.

use image::{Rgb, RgbImage};

use crate::error::{RaError, Result};
use crate::types::Colour;

/// A square pixel buffer the rasterizer can paint.
pub trait Surface {
    /// Side length in pixels.
    fn side(&self) -> u32;

    /// Paint the `d x d` block whose top-left corner is `(x, y)`.
    ///
    /// Parts of the block outside the surface are skipped.
    fn fill_block(&mut self, x: u32, y: u32, d: u32, colour: Colour);
}

/// Range of pixel indices covered by a block starting at `start`, clipped to `side`.
pub(crate) fn block_span(start: u32, d: u32, side: u32) -> std::ops::Range<u32> {
    start.min(side)..start.saturating_add(d).min(side)
}

/// A surface backed by an in-memory RGB image.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    /// Wrap an existing image, which must be square.
    pub fn new(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(RaError::Canvas {
                message: format!("side lengths must be equal, got {}x{}", width, height),
                help: Some("Artworks render onto square canvases".to_string()),
            });
        }
        Ok(Self { image })
    }

    /// A black square image with the given side length.
    pub fn with_side(side: u32) -> Self {
        Self {
            image: RgbImage::new(side, side),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Colour::rgb(p.0[0], p.0[1], p.0[2]))
    }
}

impl Surface for ImageSurface {
    fn side(&self) -> u32 {
        self.image.width()
    }

    fn fill_block(&mut self, x: u32, y: u32, d: u32, colour: Colour) {
        let side = self.side();
        let rgb = Rgb(colour.to_rgb());
        for px in block_span(x, d, side) {
            for py in block_span(y, d, side) {
                self.image.put_pixel(px, py, rgb);
            }
        }
    }
}
