//! Main module for the solver: iteration engine, cones, linear system
//! seam and the default implementation.

pub mod core;
pub mod implementations;
pub(crate) mod utils;

// core solver components
pub use crate::solver::core::cones::{ConeError, SupportedConeT, SupportedConeT::*};
pub use crate::solver::core::linsys;
pub use crate::solver::core::solver::*;
pub use crate::solver::core::traits;
pub use crate::solver::core::SettingsError;

// default solver implementation
pub use crate::solver::implementations::default::*;

// configurable print targets
pub use crate::io::ConfigurablePrintTarget;

// user settable infinity bound
pub use crate::solver::utils::infbounds::{default_infinity, get_infinity, set_infinity};
pub(crate) const _INFINITY_DEFAULT: f64 = 1e20;
