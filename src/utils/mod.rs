//! Bit slicing and state text helpers shared by the engines.

pub mod bits;
pub mod converter;
