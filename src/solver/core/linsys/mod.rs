//! Linear subsystem solvers for the splitting method.
//!
//! Each iteration requires the solution of a symmetric quasidefinite
//! system in the matrix
//!
//! ```text
//! [ rho_x*I + P     A'       ]
//! [     A       -diag(rho_y) ]
//! ```
//!
//! Implementations of [`LinSysSolver`] own the factorization of this
//! matrix and are selected by name through the
//! [`direct_solve_method`](crate::solver::implementations::default::DefaultSettings)
//! setting.

use crate::algebra::{CscMatrix, FloatT};
use thiserror::Error;

mod denseldl;
pub use denseldl::*;

/// Error type returned by linear subsystem solvers.
#[derive(Error, Debug)]
pub enum FactorizationError {
    /// Unrecognized solver name in the `direct_solve_method` setting
    #[error("Unrecognized linear solver method '{0}'")]
    UnknownMethod(String),
    /// Matrix dimensions are inconsistent
    #[error("Matrix dimensions are incompatible")]
    IncompatibleDimension,
    /// Factorization produced a zero or non-finite pivot
    #[error("Matrix factorization failed")]
    NumericalError,
}

/// Solver for the symmetric quasidefinite subsystem of the splitting
/// iteration.
pub trait LinSysSolver<T: FloatT> {
    /// Assemble and factor the subsystem matrix.  `P` is the upper
    /// triangle of the quadratic cost term, or `None` when absent.
    fn factorize(
        &mut self,
        a: &CscMatrix<T>,
        p: Option<&CscMatrix<T>>,
        rho_x: T,
        rho_y: &[T],
    ) -> Result<(), FactorizationError>;

    /// Solve in place for the assembled matrix.  `warm_start` carries
    /// the previous solution for backends with iterative refinement or
    /// indirect methods, and may be ignored.
    fn solve(&mut self, rhs: &mut [T], warm_start: Option<&[T]>);

    /// Replace the `rho_y` diagonal block and refactor.  Called on
    /// adaptive scale updates.
    fn update_rho(&mut self, rho_y: &[T]) -> Result<(), FactorizationError>;
}
