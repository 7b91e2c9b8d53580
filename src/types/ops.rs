//! Colour operators.
//!
//! Pure channel-wise transforms shared by every evaluation backend:
//! - `average` - weighted blend of two colours
//! - `product` - channel product
//! - `modulo` - channel remainder
//! - `well` / `tent` - saturating shapes
//! - `sin` - sinusoidal remap
//! - `level` - threshold select

use crate::types::ContinuousColour;

/// A function which looks a bit like a well.
fn well_scalar(x: f64) -> f64 {
    1.0 - 2.0 / (1.0 + x * x).powi(8)
}

/// A function that looks a bit like a tent.
fn tent_scalar(x: f64) -> f64 {
    1.0 - 2.0 * x.abs()
}

/// Weighted average: `w * c1 + (1 - w) * c2`. `w = 0.5` gives the mean.
pub fn average(c1: ContinuousColour, c2: ContinuousColour, weight: f64) -> ContinuousColour {
    c1.zip(c2, |a, b| weight * a + (1.0 - weight) * b)
}

pub fn product(c1: ContinuousColour, c2: ContinuousColour) -> ContinuousColour {
    c1.zip(c2, |a, b| a * b)
}

/// Truncated remainder, sign follows `c1`. A zero divisor channel yields NaN.
pub fn modulo(c1: ContinuousColour, c2: ContinuousColour) -> ContinuousColour {
    c1.zip(c2, |a, b| a % b)
}

pub fn well(c: ContinuousColour) -> ContinuousColour {
    c.map(well_scalar)
}

pub fn tent(c: ContinuousColour) -> ContinuousColour {
    c.map(tent_scalar)
}

/// `sin(phase + freq * c)` per channel.
pub fn sin(c: ContinuousColour, phase: f64, freq: f64) -> ContinuousColour {
    c.map(|v| (phase + freq * v).sin())
}

/// Per channel: `c1` where `selector < threshold`, else `c2`.
pub fn level(
    threshold: f64,
    selector: ContinuousColour,
    c1: ContinuousColour,
    c2: ContinuousColour,
) -> ContinuousColour {
    let pick = |s: f64, a: f64, b: f64| if s < threshold { a } else { b };
    ContinuousColour::new(
        pick(selector.r, c1.r, c2.r),
        pick(selector.g, c1.g, c2.g),
        pick(selector.b, c1.b, c2.b),
    )
}
