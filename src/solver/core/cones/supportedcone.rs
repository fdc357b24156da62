use super::*;
use crate::algebra::triangular_number;

// ---------------------------------------------------
// We define some machinery here for enumerating the
// different cone types that can live in the composite cone
// ---------------------------------------------------

/// API type describing the type of a conic constraint.

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SupportedConeT<T> {
    /// The zero cone (used for equality constraints).
    ///
    /// The parameter indicates the cone's dimension.
    ZeroConeT(usize),
    /// The nonnegative cone.
    ///
    /// The parameter indicates the cone's dimension.
    NonnegativeConeT(usize),
    /// The box cone {(t,s) : t*l <= s <= t*u, t >= 0}.
    ///
    /// The parameters are the lower and upper bound vectors, which must
    /// have equal lengths.  Entries at or beyond the crate infinity
    /// threshold are treated as unbounded.
    BoxConeT(Vec<T>, Vec<T>),
    /// The second order cone.
    ///
    /// The parameter indicates the cone's dimension.
    SecondOrderConeT(usize),
    /// The positive semidefinite cone in scaled triangular form.
    ///
    /// The parameter indicates the matrix dimension, i.e. size = n
    /// means that the variable is the upper triangle of an nxn matrix.
    PSDTriangleConeT(usize),
    /// The exponential cone in R^3.
    ///
    /// This cone takes no parameters.
    ExponentialConeT(),
    /// The dual exponential cone in R^3.
    ///
    /// This cone takes no parameters.
    DualExponentialConeT(),
    /// The power cone in R^3.
    ///
    /// The parameter indicates the power.   A negative value declares
    /// the dual cone with exponent |a|.
    PowerConeT(T),
}

impl<T: FloatT> SupportedConeT<T> {
    // this reports the number of entries the cone spans in the
    // constraint vector, which is not necessarily the same as the
    // parameter used to construct it
    pub fn nvars(&self) -> usize {
        match self {
            SupportedConeT::ZeroConeT(dim) => *dim,
            SupportedConeT::NonnegativeConeT(dim) => *dim,
            SupportedConeT::BoxConeT(l, _) => l.len() + 1,
            SupportedConeT::SecondOrderConeT(dim) => *dim,
            SupportedConeT::PSDTriangleConeT(dim) => triangular_number(*dim),
            SupportedConeT::ExponentialConeT() => 3,
            SupportedConeT::DualExponentialConeT() => 3,
            SupportedConeT::PowerConeT(_) => 3,
        }
    }
}

// make a cone object from the api type, validating its parameters
pub(crate) fn make_cone<T: FloatT>(
    cone: &SupportedConeT<T>,
) -> Result<SupportedCone<T>, ConeError> {
    let out = match cone {
        SupportedConeT::ZeroConeT(dim) => ZeroCone::<T>::new(*dim).into(),
        SupportedConeT::NonnegativeConeT(dim) => NonnegativeCone::<T>::new(*dim).into(),
        SupportedConeT::BoxConeT(l, u) => BoxCone::<T>::new(l, u)?.into(),
        SupportedConeT::SecondOrderConeT(dim) => SecondOrderCone::<T>::new(*dim).into(),
        SupportedConeT::PSDTriangleConeT(dim) => PSDTriangleCone::<T>::new(*dim).into(),
        SupportedConeT::ExponentialConeT() => ExponentialCone::<T>::new().into(),
        SupportedConeT::DualExponentialConeT() => DualExponentialCone::<T>::new().into(),
        SupportedConeT::PowerConeT(α) => {
            if *α == T::zero() || T::abs(*α) > T::one() {
                return Err(ConeError::InvalidPowerExponent);
            }
            PowerCone::<T>::new(*α).into()
        }
    };
    Ok(out)
}

// ---------------------------------------------------
// internal enum for the constituent cone types
// ---------------------------------------------------

#[enum_dispatch(Cone<T>)]
pub enum SupportedCone<T>
where
    T: FloatT,
{
    ZeroCone(ZeroCone<T>),
    NonnegativeCone(NonnegativeCone<T>),
    BoxCone(BoxCone<T>),
    SecondOrderCone(SecondOrderCone<T>),
    PSDTriangleCone(PSDTriangleCone<T>),
    ExponentialCone(ExponentialCone<T>),
    DualExponentialCone(DualExponentialCone<T>),
    PowerCone(PowerCone<T>),
}

// we use the SupportedConeTag as a user facing marker for the cone
// types, since the internal representation is not publicly accessible

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SupportedConeTag {
    ZeroCone,
    NonnegativeCone,
    BoxCone,
    SecondOrderCone,
    PSDTriangleCone,
    ExponentialCone,
    DualExponentialCone,
    PowerCone,
}

pub(crate) trait SupportedConeAsTag {
    fn as_tag(&self) -> SupportedConeTag;
}

impl<T: FloatT> SupportedConeAsTag for SupportedConeT<T> {
    fn as_tag(&self) -> SupportedConeTag {
        match self {
            SupportedConeT::ZeroConeT(_) => SupportedConeTag::ZeroCone,
            SupportedConeT::NonnegativeConeT(_) => SupportedConeTag::NonnegativeCone,
            SupportedConeT::BoxConeT(..) => SupportedConeTag::BoxCone,
            SupportedConeT::SecondOrderConeT(_) => SupportedConeTag::SecondOrderCone,
            SupportedConeT::PSDTriangleConeT(_) => SupportedConeTag::PSDTriangleCone,
            SupportedConeT::ExponentialConeT() => SupportedConeTag::ExponentialCone,
            SupportedConeT::DualExponentialConeT() => SupportedConeTag::DualExponentialCone,
            SupportedConeT::PowerConeT(_) => SupportedConeTag::PowerCone,
        }
    }
}

impl<T: FloatT> SupportedConeAsTag for SupportedCone<T> {
    fn as_tag(&self) -> SupportedConeTag {
        match self {
            SupportedCone::ZeroCone(_) => SupportedConeTag::ZeroCone,
            SupportedCone::NonnegativeCone(_) => SupportedConeTag::NonnegativeCone,
            SupportedCone::BoxCone(_) => SupportedConeTag::BoxCone,
            SupportedCone::SecondOrderCone(_) => SupportedConeTag::SecondOrderCone,
            SupportedCone::PSDTriangleCone(_) => SupportedConeTag::PSDTriangleCone,
            SupportedCone::ExponentialCone(_) => SupportedConeTag::ExponentialCone,
            SupportedCone::DualExponentialCone(_) => SupportedConeTag::DualExponentialCone,
            SupportedCone::PowerCone(_) => SupportedConeTag::PowerCone,
        }
    }
}

impl SupportedConeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedConeTag::ZeroCone => "ZeroCone",
            SupportedConeTag::NonnegativeCone => "NonnegativeCone",
            SupportedConeTag::BoxCone => "BoxCone",
            SupportedConeTag::SecondOrderCone => "SecondOrderCone",
            SupportedConeTag::PSDTriangleCone => "PSDTriangleCone",
            SupportedConeTag::ExponentialCone => "ExponentialCone",
            SupportedConeTag::DualExponentialCone => "DualExponentialCone",
            SupportedConeTag::PowerCone => "PowerCone",
        }
    }
}
