//! Colour types.
//!
//! Expressions compute with [`ContinuousColour`], whose channels live
//! nominally in `[-1, 1]`. Surfaces store [`Colour`], the quantized 8-bit
//! form produced by [`ContinuousColour::quantize`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A quantized RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Pack into a `0x00RRGGBB` word.
    pub fn pack_rgb(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Unpack a `0x00RRGGBB` word. The top byte is ignored.
    pub fn unpack_rgb(word: u32) -> Self {
        Self::rgb((word >> 16) as u8, (word >> 8) as u8, word as u8)
    }

    /// Convert to RGB array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A floating point colour used while evaluating expressions.
///
/// Channels are unbounded; `-1.0` is the darkest and `1.0` the brightest
/// value that survives quantization unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContinuousColour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ContinuousColour {
    /// Create a colour from its three channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// A colour with all channels equal to `v`.
    pub const fn grey(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// All channels zero.
    pub const ZERO: Self = Self::grey(0.0);

    /// Apply `f` to every channel.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Combine two colours channel by channel.
    pub fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Map each channel with `clamp(0, 255, round(128 * (c + 1)))`.
    ///
    /// NaN channels quantize to 0.
    pub fn quantize(self) -> Colour {
        Colour::rgb(
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
        )
    }
}

fn quantize_channel(c: f64) -> u8 {
    // Float-to-int `as` saturates and sends NaN to 0.
    (128.0 * (c + 1.0)).round().clamp(0.0, 255.0) as u8
}

impl From<[f64; 3]> for ContinuousColour {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}
