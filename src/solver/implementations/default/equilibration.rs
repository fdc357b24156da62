#![allow(non_snake_case)]
use crate::algebra::*;

// ---------------
// equilibration data
// ---------------

// floor applied when inverting the normalized b and c norms, so that
// zero data cannot produce an unbounded scaling
pub(crate) const MIN_SCALE: f64 = 1e-6;

/// Data from the Ruiz equilibration procedure
pub struct DefaultEquilibration<T> {
    // scaling matrices for problem data equilibration
    // fields d,e,dinv,einv are vectors of scaling values
    // to be treated as diagonal scaling data
    /// Vector of variable scaling terms
    pub d: Vec<T>,
    /// Vector of inverse variable scaling terms
    pub dinv: Vec<T>,
    /// Vector of constraint scaling terms
    pub e: Vec<T>,
    /// Vector of inverse constraint scaling terms
    pub einv: Vec<T>,
    /// overall scaling applied to the primal data (b side)
    pub primal_scale: T,
    /// overall scaling applied to the dual data (c side)
    pub dual_scale: T,
}

impl<T> DefaultEquilibration<T>
where
    T: FloatT,
{
    /// creates a new equilibration object
    pub fn new(n: usize, m: usize) -> Self {
        // Left/Right diagonal scaling for problem data
        let d = vec![T::one(); n];
        let dinv = vec![T::one(); n];
        let e = vec![T::one(); m];
        let einv = vec![T::one(); m];

        Self {
            d,
            dinv,
            e,
            einv,
            primal_scale: T::one(),
            dual_scale: T::one(),
        }
    }
}
