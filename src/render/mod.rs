//! Rendering module for randomart.
//!
//! This module handles painting artworks onto square surfaces and writing
//! those surfaces out as PNG images or raw pixel slabs.

mod png;
mod raster;
mod slab;
mod surface;

pub use png::{scale_image, write_png};
pub use raster::{render_image, render_slab, ColumnDone, Columns, Rasterizer};
pub use slab::MemorySlab;
pub use surface::{ImageSurface, Surface};
