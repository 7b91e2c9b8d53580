//! Raw pixel slabs.
//!
//! A slab is a flat array of packed `0x00RRGGBB` words in row-major order
//! (`y * side + x`). On disk it is big-endian: the width, the height, then
//! one word per pixel.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{RaError, Result};
use crate::types::Colour;

use super::surface::{block_span, Surface};

/// A surface of packed RGB words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySlab {
    side: u32,
    pixels: Vec<u32>,
}

impl MemorySlab {
    /// A black slab with the given side length.
    pub fn new(side: u32) -> Self {
        Self {
            side,
            pixels: vec![0; side as usize * side as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.side || y >= self.side {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied().map(Colour::unpack_rgb)
    }

    /// Packed words in row-major order.
    pub fn words(&self) -> &[u32] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.side as usize + x as usize
    }

    /// Serialize to the big-endian slab format.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        out.write_all(&self.side.to_be_bytes())?;
        out.write_all(&self.side.to_be_bytes())?;
        for word in &self.pixels {
            out.write_all(&word.to_be_bytes())?;
        }
        out.flush()?;
        Ok(())
    }

    /// Parse the big-endian slab format.
    pub fn read_from<R: Read>(mut input: R) -> Result<Self> {
        let width = read_word(&mut input, "width")?;
        let height = read_word(&mut input, "height")?;
        if width != height {
            return Err(RaError::Canvas {
                message: format!("slab is {}x{}, side lengths must be equal", width, height),
                help: None,
            });
        }

        let count = (width as usize)
            .checked_mul(height as usize)
            .filter(|count| count.checked_mul(4).is_some())
            .ok_or_else(|| RaError::Parse {
                message: format!("slab header {}x{} is too large", width, height),
                help: None,
            })?;

        // Storage grows with the words actually read, not with the header.
        let mut pixels = Vec::new();
        for _ in 0..count {
            pixels.push(read_word(&mut input, "pixel data")?);
        }
        Ok(Self { side: width, pixels })
    }

    /// Write the slab to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| RaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to create slab: {}", e),
        })?;
        self.write_to(BufWriter::new(file))
    }

    /// Read a slab from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| RaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to open slab: {}", e),
        })?;
        Self::read_from(BufReader::new(file))
    }
}

fn read_word<R: Read>(input: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf).map_err(|e| RaError::Parse {
        message: format!("Truncated slab while reading {}: {}", what, e),
        help: None,
    })?;
    Ok(u32::from_be_bytes(buf))
}

impl Surface for MemorySlab {
    fn side(&self) -> u32 {
        self.side
    }

    fn fill_block(&mut self, x: u32, y: u32, d: u32, colour: Colour) {
        let word = colour.pack_rgb();
        for py in block_span(y, d, self.side) {
            for px in block_span(x, d, self.side) {
                let i = self.index(px, py);
                self.pixels[i] = word;
            }
        }
    }
}
