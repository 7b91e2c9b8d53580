//! randomart - Random expression art generator
//!
//! A library for growing random colour expression trees over `(x, y)` and
//! rasterizing them into images, either by walking the tree per pixel or
//! through a compiled (reified) form.

pub mod artwork;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod reify;
pub mod render;
pub mod types;

pub use artwork::{load_tree, save_tree, Artwork};
pub use config::{Backend, OutputFormat, Settings};
pub use error::{RaError, Result};
pub use generate::{generate, max_nodes, random_budget};
pub use reify::Reified;
pub use render::{
    render_image, render_slab, write_png, ColumnDone, ImageSurface, MemorySlab, Rasterizer,
    Surface,
};
pub use types::{ops, Colour, ContinuousColour, Evaluate, Expr, Op};
