//! Utility modules

pub mod text;

pub use text::{char_slice, CharIndex};
