#![allow(non_snake_case)]
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Serialize};

/// Core bounds for floating point types used by the solver, with blanket
/// implementations for f32 and f64.  Any other type satisfying the
/// constituent [`num_traits`](num_traits) bounds will also work.
pub trait CoreFloatT:
    'static
    + Send
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> CoreFloatT for T where
    T: 'static
        + Send
        + Float
        + FloatConst
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

// when serde is enabled, scalar types must also be serializable so
// that problem data dumps work for any FloatT

/// Main trait for floating point types used by the solver.
#[cfg(feature = "serde")]
pub trait FloatT: CoreFloatT + Serialize + DeserializeOwned {}
/// Main trait for floating point types used by the solver.
#[cfg(not(feature = "serde"))]
pub trait FloatT: CoreFloatT {}

#[cfg(feature = "serde")]
impl<T> FloatT for T where T: CoreFloatT + Serialize + DeserializeOwned {}
#[cfg(not(feature = "serde"))]
impl<T> FloatT for T where T: CoreFloatT {}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// Implemented on f32/64 and u32/64/usize so that constants can be written
/// as `(2.0).as_T()` rather than `T::from_f64(2.0).unwrap()`.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(u32, from_u32);
impl_as_FloatT!(u64, from_u64);
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);
