//! Rasterizer - paints an artwork onto a surface.
//!
//! Pixels are visited column by column (`x` outer, `y` inner). Each block of
//! `d x d` pixels is evaluated once at
//! `u = 2 * (x + d / 2) / side - 1`, `v = 2 * (y + d / 2) / side - 1`, with
//! `d / 2` in integer arithmetic, so for unit blocks the sample sits on the
//! block's top-left corner and `u, v` run over `[-1, 1 - 2 / side]`.

use std::time::Instant;

use crate::artwork::Artwork;
use crate::error::{RaError, Result};
use crate::types::Evaluate;

use super::slab::MemorySlab;
use super::surface::{ImageSurface, Surface};

/// Progress report yielded after each finished column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDone {
    /// Left edge of the column that was just painted.
    pub x: u32,
    /// Number of columns painted so far in this pass.
    pub done: u32,
    /// Number of columns in a full pass.
    pub total: u32,
}

/// Drives evaluation of an artwork over every block of a surface.
pub struct Rasterizer<'a, S: Surface> {
    art: &'a Artwork,
    surface: &'a mut S,
    block: u32,
}

impl<'a, S: Surface> Rasterizer<'a, S> {
    /// Create a rasterizer with unit blocks.
    pub fn new(art: &'a Artwork, surface: &'a mut S) -> Result<Self> {
        if surface.side() == 0 {
            return Err(RaError::Canvas {
                message: "canvas has no pixels".to_string(),
                help: Some("Use a side length of at least 1".to_string()),
            });
        }
        Ok(Self {
            art,
            surface,
            block: 1,
        })
    }

    /// Set the block size. Zero is treated as one.
    pub fn with_block(mut self, block: u32) -> Self {
        self.block = block.max(1);
        self
    }

    pub fn side(&self) -> u32 {
        self.surface.side()
    }

    pub fn block(&self) -> u32 {
        self.block
    }

    /// Map a pixel coordinate to the artwork's coordinate domain.
    pub fn to_domain(&self, p: u32) -> f64 {
        2.0 * f64::from(p + self.block / 2) / f64::from(self.side()) - 1.0
    }

    /// Evaluate and paint the single column starting at `x`.
    pub fn draw_column(&mut self, x: u32) {
        let u = self.to_domain(x);
        let mut y = 0;
        while y < self.side() {
            let colour = self.art.eval(u, self.to_domain(y)).quantize();
            self.surface.fill_block(x, y, self.block, colour);
            y += self.block;
        }
    }

    /// A lazy pass over the surface, one column per step.
    ///
    /// Each call starts a fresh pass from the left edge. Dropping the
    /// iterator stops rendering between columns.
    pub fn columns(&mut self) -> Columns<'_, 'a, S> {
        let total = self.side().div_ceil(self.block);
        Columns {
            raster: self,
            next_x: 0,
            done: 0,
            total,
        }
    }

    /// Paint the whole surface.
    pub fn redraw(&mut self) {
        let started = Instant::now();
        let columns = self.columns().count();
        log::debug!(
            "rasterized {} columns of a {}px canvas in {:?}",
            columns,
            self.side(),
            started.elapsed()
        );
    }
}

/// Iterator returned by [`Rasterizer::columns`].
pub struct Columns<'r, 'a, S: Surface> {
    raster: &'r mut Rasterizer<'a, S>,
    next_x: u32,
    done: u32,
    total: u32,
}

impl<S: Surface> Iterator for Columns<'_, '_, S> {
    type Item = ColumnDone;

    fn next(&mut self) -> Option<ColumnDone> {
        if self.done >= self.total {
            return None;
        }
        let x = self.next_x;
        self.raster.draw_column(x);
        self.next_x += self.raster.block;
        self.done += 1;
        log::trace!("column {}/{} done", self.done, self.total);
        Some(ColumnDone {
            x,
            done: self.done,
            total: self.total,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.done) as usize;
        (left, Some(left))
    }
}

/// Render `art` onto a new square image.
pub fn render_image(art: &Artwork, side: u32, block: u32) -> Result<ImageSurface> {
    let mut surface = ImageSurface::with_side(side);
    Rasterizer::new(art, &mut surface)?.with_block(block).redraw();
    Ok(surface)
}

/// Render `art` into a new pixel slab.
pub fn render_slab(art: &Artwork, side: u32, block: u32) -> Result<MemorySlab> {
    let mut slab = MemorySlab::new(side);
    Rasterizer::new(art, &mut slab)?.with_block(block).redraw();
    Ok(slab)
}
