//! Compressed sparse column matrices.

mod core;
mod matrix_math;

pub use self::core::*;
