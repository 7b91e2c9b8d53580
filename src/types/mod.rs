//! Core domain types for randomart.
//!
//! This module contains the values every other part of the crate works with:
//! - `Colour` / `ContinuousColour` - quantized and floating point colours
//! - `ops` - the channel-wise colour operators
//! - `Expr` - colour expression trees and the `Evaluate` trait

mod colour;
mod expr;
pub mod ops;

pub use colour::{Colour, ContinuousColour};
pub(crate) use expr::{guarded_modulo, mix_weight};
pub use expr::{Evaluate, Expr, Op};
