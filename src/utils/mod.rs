//! Bit, symbol and text helpers shared by the cipher layers.

pub mod bits;
pub mod converter;
pub mod text;
