//! Required traits for types providing a solver implementation.
//!
//! This module defines the core traits that must be implemented by a
//! collection of mutually associated data types to make a solver for a
//! particular problem format.
//!
//! In nearly all cases there is no need for a user to implement these
//! traits.  Instead, users should use the collection of types provided in
//! the [default solver implementation](crate::solver::implementations::default),
//! which collectively implement support for the problem format described
//! in the top level crate documentation.

use super::cones::Cone;
use super::solver::SolverStatus;
use crate::algebra::*;
use crate::timers::*;

/// Data for a conic optimization problem.

pub trait ProblemData<T: FloatT> {
    type V: Variables<T>;
    type C: Cone<T>;
    type SE: Settings<T>;

    /// Equilibrate internal data before the solver starts.
    fn equilibrate(&mut self, cones: &Self::C, settings: &Self::SE);

    /// Refresh the normalized `b` and `c` vectors from the originals.
    /// Called at the start of every solve so that data updates between
    /// solves are picked up.
    fn renormalize_vectors(&mut self);
}

/// Variables for a conic optimization problem, i.e. the embedded
/// iterate pair (u, v) of the splitting method.

pub trait Variables<T: FloatT> {
    type D: ProblemData<T>;
    type C: Cone<T>;
    type SE: Settings<T>;

    /// Initialize the iterate at the standard starting point of the
    /// homogeneous embedding.
    fn cold_start(&mut self);

    /// Save the lagged iterate copy before an iteration is taken.
    fn save_prev(&mut self);

    /// Apply over-relaxation, project onto the embedding cone and take
    /// the dual update, transforming the post linear solve point into
    /// the next iterate.
    fn relax_and_project(&mut self, cones: &mut Self::C, rho_x: T, rho_y: &[T], alpha: T);

    /// Distance between the current and lagged fixed point vectors.
    fn fixed_point_residual(&self) -> T;

    /// Check that the iterate contains no Infs or NaNs.
    fn is_finite(&self) -> bool;

    /// The fixed point vector monitored by the accelerator.
    fn accel_vector(&self) -> &[T];

    /// The lagged fixed point vector, i.e. the accelerator map input.
    fn accel_vector_prev(&self) -> &[T];

    /// Overwrite the fixed point vector, e.g. with an extrapolant.
    fn set_accel_vector(&mut self, v: &[T]);
}

/// Residuals for a conic optimization problem.

pub trait Residuals<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;

    /// Compute residuals for the given variables.  The `iter` tag is
    /// used for caching: a repeated call for the same iteration is
    /// a no-op.
    fn update(&mut self, variables: &Self::V, data: &Self::D, iter: u32);

    /// Ratio of relative primal to relative dual residual in the
    /// normalized data space, consumed by adaptive rescaling.
    fn scale_ratio(&self) -> T;
}

/// The linear stage of the splitting method: owns the embedding
/// metric (rho terms) and the factorized linear system.

pub trait SplitSystem<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Refresh terms that depend on the normalized `b` and `c`
    /// vectors.  Called once at the start of every solve.
    fn update_constants(&mut self, data: &Self::D) -> bool;

    /// Solve the linear stage of the iteration, writing the post
    /// linear solve point into the variables.
    fn solve(&mut self, variables: &mut Self::V, data: &Self::D) -> bool;

    /// The metric weight on the x block.
    fn rho_x(&self) -> T;

    /// The per-row metric weights on the y block.
    fn rho_y(&self) -> &[T];

    /// The current overall scale factor.
    fn scale(&self) -> T;

    /// Adaptive rescaling step.   `ratio` is the primal/dual residual
    /// balance statistic from the most recent residual refresh.  Returns
    /// the new scale if one was applied.
    fn adapt_scale(&mut self, ratio: T, iter: u32, data: &Self::D, settings: &Self::SE)
        -> Option<T>;
}

/// Acceleration for the fixed point sequence of the splitting method.

pub trait Accelerator<T: FloatT> {
    /// Discard all history and any staged candidate.
    fn reset(&mut self);

    /// Record a map input/output pair (x, F(x)).
    fn update(&mut self, x: &[T], fx: &[T]);

    /// Compute an extrapolated candidate from the recorded history,
    /// if one is available.
    fn accelerate(&mut self) -> Option<&[T]>;

    /// The most recently computed extrapolation candidate.
    fn candidate(&self) -> &[T];

    /// Stage a just-applied candidate for the deferred safeguard check,
    /// recording the fallback iterate and its residual norm.
    fn stage(&mut self, f_norm: T);

    /// Residual norm recorded with the staged candidate, if any.
    fn staged_norm(&self) -> Option<T>;

    /// Fallback iterate to restore if the staged candidate is rejected.
    fn fallback(&self) -> &[T];

    /// Reject the staged candidate and reset the history.
    fn reject(&mut self);

    /// Accept the staged candidate.
    fn accept(&mut self);

    /// Count of rejected candidates since the last reset.
    fn rejections(&self) -> u32;
}

/// Printing functions for the solver's Info

pub trait InfoPrint<T>
where
    T: FloatT,
{
    type D: ProblemData<T>;
    type C: Cone<T>;
    type SE: Settings<T>;

    /// Print the solver configuration, e.g. settings etc.
    /// This function is called once at the start of the solve.
    fn print_configuration(&mut self, settings: &Self::SE, data: &Self::D, cones: &Self::C);

    /// Print a header to appear at the top of progress information.
    fn print_status_header(&mut self, settings: &Self::SE);

    /// Print solver progress information.  Called at every residual
    /// refresh.
    fn print_status(&mut self, settings: &Self::SE);

    /// Print solver final status and other exit information.   Called at
    /// solver termination.
    fn print_footer(&mut self, settings: &Self::SE);
}

/// Internal information for the solver to monitor progress and check for
/// termination.

pub trait Info<T>: InfoPrint<T>
where
    T: FloatT,
{
    type V: Variables<T>;
    type R: Residuals<T>;

    /// Reset internal data, particularly solve timers, and open any
    /// configured diagnostic outputs.
    fn reset(&mut self, timers: &mut Timers, settings: &Self::SE);

    /// Update solver progress information.
    fn update(
        &mut self,
        data: &Self::D,
        variables: &Self::V,
        residuals: &Self::R,
        timers: &Timers,
        iter: u32,
    );

    /// Return `true` if termination conditions have been reached.
    fn check_termination(&mut self, residuals: &Self::R, settings: &Self::SE, iter: u32) -> bool;

    /// Compute final values before solver termination, including the
    /// reduced tolerance fallback checks for soft stops.
    fn finalize(&mut self, residuals: &Self::R, settings: &Self::SE, timers: &mut Timers);

    /// Record an adaptive scale update.
    fn save_scale_update(&mut self, scale: T);

    /// Record a rejected acceleration candidate.
    fn save_accel_rejection(&mut self);

    /// Report or update termination status
    fn get_status(&self) -> SolverStatus;
    fn set_status(&mut self, status: SolverStatus);
}

/// Solution for a conic optimization problem.

pub trait Solution<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type I: Info<T>;
    type SE: Settings<T>;

    /// Load this solution into the variables as a warm start.
    fn warm_start(&self, variables: &mut Self::V, data: &Self::D);

    /// Compute the unscaled solution from the variables at solver
    /// termination.
    fn finalize(
        &mut self,
        data: &Self::D,
        variables: &Self::V,
        info: &Self::I,
        settings: &Self::SE,
    );
}

/// Settings for a conic optimization problem.
///
/// Implementors of this trait can define any internal or problem specific
/// settings they wish.   They must, however, also maintain a settings
/// object of type [`CoreSettings`](crate::solver::core::CoreSettings)
/// and return this to the solver internally.

pub trait Settings<T: FloatT> {
    /// Return the core settings.
    fn core(&self) -> &crate::solver::core::CoreSettings<T>;

    /// Return the core settings (mutably).
    fn core_mut(&mut self) -> &mut crate::solver::core::CoreSettings<T>;

    /// Check that the settings are valid.
    fn validate(&self) -> Result<(), crate::solver::core::SettingsError>;

    /// Check that a settings object is valid as an updated collection of
    /// settings for a solver that has already been initialized.  This
    /// should reject changes to parameters that are only applicable
    /// during solver initialization.
    fn validate_as_update(
        &self,
        prev: &Self,
    ) -> Result<(), crate::solver::core::SettingsError>;
}
