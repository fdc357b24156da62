#![allow(non_snake_case)]

use crate::algebra::FloatT;
use enum_dispatch::*;
use thiserror::Error;

//primitive cone types
mod boxcone;
mod expcone;
mod nonnegativecone;
mod powcone;
mod psdtrianglecone;
mod socone;
mod zerocone;

//shared projection kernels for the exponential and power families
mod exppow_common;

//the supported cone wrapper type for primitives
//and the composite cone
mod compositecone;
mod supportedcone;

//flatten all cone implementations to appear in this module
pub use boxcone::*;
pub use compositecone::*;
pub use expcone::*;
pub use nonnegativecone::*;
pub use powcone::*;
pub use psdtrianglecone::*;
pub use socone::*;
pub use supportedcone::*;
pub use zerocone::*;

/// Error type returned by cone constraint validation
#[derive(Error, Debug)]
pub enum ConeError {
    /// Box cone bounds are inconsistent
    #[error("Box cone bounds must have equal lengths and satisfy l <= u")]
    InvalidBoxBounds,
    /// Power cone exponent is out of range
    #[error("Power cone exponent must satisfy 0 < |a| <= 1")]
    InvalidPowerExponent,
}

#[enum_dispatch]
pub trait Cone<T>
where
    T: FloatT,
{
    /// Number of vector entries spanned by the cone.
    fn numel(&self) -> usize;

    /// Convert an elementwise scaling into a scaling that preserves
    /// cone membership.   Returns `true` if the scaling was modified.
    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool;

    /// Project `z` onto the dual of the declared cone.
    fn project_dual(&mut self, z: &mut [T]);
}
