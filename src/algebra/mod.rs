//! Basic linear algebra: floating point abstractions, slice math, and
//! sparse matrices in CSC format.

mod csc;
pub(crate) mod dense;
mod error_types;
mod floats;
mod math_traits;
mod scalarmath;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use scalarmath::triangular_number;
