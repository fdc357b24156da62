//! Core implementation of the solver: engine, traits, cones and the
//! linear system seam.
//!
//! Types in this module are problem format agnostic.   The concrete
//! [default implementation](crate::solver::implementations::default)
//! assembles them into a solver for the problem format described in the
//! top level crate documentation.

pub mod accel;
pub(crate) mod callbacks;
pub mod cones;
pub mod linsys;
mod settings;
pub mod solver;
pub mod traits;

pub use settings::*;
pub use solver::*;
