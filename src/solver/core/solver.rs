use self::internal::*;
use super::callbacks::*;
use super::cones::Cone;
use super::traits::*;
use crate::algebra::*;
use crate::timers::*;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// Solver terminated with a solution (reduced accuracy).
    SolvedInaccurate,
    /// Problem is primal infeasible.  Solution returned is a certificate of infeasibility.
    Infeasible,
    /// Problem is primal infeasible.  Solution returned is a certificate of infeasibility (reduced accuracy).
    InfeasibleInaccurate,
    /// Problem is unbounded below.  Solution returned is a certificate of unboundedness.
    Unbounded,
    /// Problem is unbounded below.  Solution returned is a certificate of unboundedness (reduced accuracy).
    UnboundedInaccurate,
    /// Iteration limit reached before solution or certificate found.
    MaxIterations,
    /// Time limit reached before solution or certificate found.
    TimeLimit,
    /// An external stop request was observed between iterations.
    Interrupted,
    /// Solver terminated with a numerical error.
    Failure,
}

impl SolverStatus {
    /// true for the `Solved` / `SolvedInaccurate` pair
    pub fn is_converged(&self) -> bool {
        matches!(*self, SolverStatus::Solved | SolverStatus::SolvedInaccurate)
    }

    /// true if the solution is an infeasibility or unboundedness certificate
    pub fn is_certificate(&self) -> bool {
        matches!(
            *self,
            SolverStatus::Infeasible
                | SolverStatus::InfeasibleInaccurate
                | SolverStatus::Unbounded
                | SolverStatus::UnboundedInaccurate
        )
    }

    /// true for any of the reduced accuracy statuses
    pub fn is_inaccurate(&self) -> bool {
        matches!(
            *self,
            SolverStatus::SolvedInaccurate
                | SolverStatus::InfeasibleInaccurate
                | SolverStatus::UnboundedInaccurate
        )
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let msg = match self {
            SolverStatus::Unsolved => "unsolved",
            SolverStatus::Solved => "solved",
            SolverStatus::SolvedInaccurate => "solved (inaccurate)",
            SolverStatus::Infeasible => "primal infeasible",
            SolverStatus::InfeasibleInaccurate => "primal infeasible (inaccurate)",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::UnboundedInaccurate => "unbounded (inaccurate)",
            SolverStatus::MaxIterations => "iteration limit reached",
            SolverStatus::TimeLimit => "time limit reached",
            SolverStatus::Interrupted => "interrupted",
            SolverStatus::Failure => "numerical failure",
        };
        write!(f, "{}", msg)
    }
}

impl Default for SolverStatus {
    fn default() -> Self {
        SolverStatus::Unsolved
    }
}

// ---------------------------------
// top level solver container type
// ---------------------------------

// The top-level solver.

// This struct is defined over a collection of mutually interacting
// associated types.  See the
// [`DefaultSolver`](crate::solver::implementations::default) for an example.

pub struct Solver<D, V, R, K, C, A, I, SO, SE> {
    pub data: D,
    pub variables: V,
    pub residuals: R,
    pub splitsystem: K,
    pub cones: C,
    pub(crate) accel: A,
    pub info: I,
    pub solution: SO,
    pub settings: SE,
    pub timers: Option<Timers>,
    pub(crate) callbacks: SolverCallbacks<I>,
}

impl<D, V, R, K, C, A, I, SO, SE> Solver<D, V, R, K, C, A, I, SO, SE> {
    /// Install a callback that is polled between iterations.  Returning
    /// `true` stops the solver with `Interrupted` status.
    pub fn set_termination_callback<F>(&mut self, f: F)
    where
        F: FnMut(&I) -> bool + Send + 'static,
    {
        self.callbacks.termination_callback = Callback::Rust(Box::new(f));
    }

    /// Remove a previously installed termination callback.
    pub fn unset_termination_callback(&mut self) {
        self.callbacks.termination_callback = Callback::None;
    }
}

// ---------------------------------
// OpSplitSolver trait and its standard implementation.
// ---------------------------------

/// An operator splitting solver on the homogeneous self-dual embedding.

// Only the main solver function lives in OpSplitSolver, since this is
// the only publicly facing trait we want to give the solver.   Additional
// internal functionality for the top level solver object is implemented
// for the OpSplitInternals trait below, upon which OpSplitSolver depends.

pub trait OpSplitSolver<T, D, V, R, K, C, A, I, SO, SE> {
    /// Run the solver.
    fn solve(&mut self);
}

impl<T, D, V, R, K, C, A, I, SO, SE> OpSplitSolver<T, D, V, R, K, C, A, I, SO, SE>
    for Solver<D, V, R, K, C, A, I, SO, SE>
where
    T: FloatT,
    D: ProblemData<T, V = V, C = C, SE = SE>,
    V: Variables<T, D = D, C = C, SE = SE>,
    R: Residuals<T, D = D, V = V>,
    K: SplitSystem<T, D = D, V = V, SE = SE>,
    C: Cone<T>,
    A: Accelerator<T>,
    I: Info<T, D = D, V = V, R = R, C = C, SE = SE>,
    SO: Solution<T, D = D, V = V, I = I, SE = SE>,
    SE: Settings<T>,
{
    fn solve(&mut self) {
        let mut iter: u32 = 0;

        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap();

        self.info.reset(&mut timers, &self.settings);

        // solver banner, config, problem dimensions, cone types etc
        notimeit! {timers; {
            self.info.print_configuration(&self.settings, &self.data, &self.cones);
            self.info.print_status_header(&self.settings);
        }}

        timeit! {timers => "solve"; {

        // per solve refresh of the normalized vectors, the rank one
        // correction terms, and the starting point
        timeit! {timers => "initialize"; {
            self.data.renormalize_vectors();
            if !self.splitsystem.update_constants(&self.data) {
                self.info.set_status(SolverStatus::Failure);
            }
            if self.settings.core().warm_start {
                self.solution.warm_start(&mut self.variables, &self.data);
            } else {
                self.variables.cold_start();
            }
            self.accel.reset();
        }}

        if self.info.get_status() == SolverStatus::Unsolved {
        timeit! {timers => "iteration"; {

        // ----------
        // main loop
        // ----------

        loop {
            iter += 1;

            self.variables.save_prev();

            // linear stage
            // --------------
            let is_linsolve_success;
            timeit!{timers => "linear solve"; {
                is_linsolve_success = self.splitsystem.solve(&mut self.variables, &self.data);
            }}

            // relaxation, cone projection and dual update
            // --------------
            timeit!{timers => "cones"; {
                self.variables.relax_and_project(
                    &mut self.cones,
                    self.splitsystem.rho_x(),
                    self.splitsystem.rho_y(),
                    self.settings.core().alpha,
                );
            }}

            if !is_linsolve_success || !self.variables.is_finite() {
                self.info.set_status(SolverStatus::Failure);
                break;
            }

            // acceleration, with deferred safeguarding of the
            // candidate applied at the previous trigger
            // --------------
            if self.settings.core().acceleration_lookback > 0 {
                timeit!{timers => "acceleration"; {
                    self.accelerate(iter);
                }}
            }

            // external stop request
            // --------------
            if self.callbacks.check_termination(&self.info) {
                self.checkpoint_residuals(iter, &timers);
                self.info.set_status(SolverStatus::Interrupted);
                break;
            }

            // convergence checks, printing and adaptive scale
            // updates on a fixed cadence
            // --------------
            let interval = self.settings.core().check_termination_interval;
            let is_last = iter >= self.settings.core().max_iters;

            if iter % interval == 0 || is_last {
                self.checkpoint_residuals(iter, &timers);

                notimeit!{timers; {
                    self.info.print_status(&self.settings);
                }}

                if self.info.check_termination(&self.residuals, &self.settings, iter) {
                    break;
                }

                // at most one rescale event between checks, so that the
                // residual comparisons above stay valid
                if self.settings.core().adaptive_scale {
                    let ratio = self.residuals.scale_ratio();
                    if let Some(scale) =
                        self.splitsystem.adapt_scale(ratio, iter, &self.data, &self.settings)
                    {
                        self.info.save_scale_update(scale);
                        self.accel.reset();
                    }
                }
            }

            // wall clock limit, polled once per iteration
            // --------------
            if self.time_limit_reached(&timers) {
                self.checkpoint_residuals(iter, &timers);
                self.info.set_status(SolverStatus::TimeLimit);
                break;
            }

        } //end loop
        // ----------
        // ----------

        }} //end "iteration" timer
        }

        }} // end "solve" timer

        //store final solution, timing etc
        self.info
            .finalize(&self.residuals, &self.settings, &mut timers);

        self.solution
            .finalize(&self.data, &self.variables, &self.info, &self.settings);

        notimeit! {timers; {
            self.info.print_footer(&self.settings);
        }}

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);
    }
}

// Encapsulate the internal helpers trait in a private module
// so it doesn't get exported
mod internal {
    use super::*;

    pub(super) trait OpSplitInternals<T, D, V, R, K, C, A, I, SO, SE> {
        /// Acceleration bookkeeping for one iteration: safeguard any
        /// staged candidate, record the new map pair, and extrapolate
        /// on the configured cadence.
        fn accelerate(&mut self, iter: u32);

        /// Refresh residuals and progress information at the current
        /// iteration if they are not already current.
        fn checkpoint_residuals(&mut self, iter: u32, timers: &Timers);

        /// True if a wall clock limit is configured and exceeded.
        fn time_limit_reached(&self, timers: &Timers) -> bool;
    }

    impl<T, D, V, R, K, C, A, I, SO, SE> OpSplitInternals<T, D, V, R, K, C, A, I, SO, SE>
        for Solver<D, V, R, K, C, A, I, SO, SE>
    where
        T: FloatT,
        D: ProblemData<T, V = V, C = C, SE = SE>,
        V: Variables<T, D = D, C = C, SE = SE>,
        R: Residuals<T, D = D, V = V>,
        K: SplitSystem<T, D = D, V = V, SE = SE>,
        C: Cone<T>,
        A: Accelerator<T>,
        I: Info<T, D = D, V = V, R = R, C = C, SE = SE>,
        SO: Solution<T, D = D, V = V, I = I, SE = SE>,
        SE: Settings<T>,
    {
        fn accelerate(&mut self, iter: u32) {
            let f_norm = self.variables.fixed_point_residual();

            // deferred safeguard: a candidate applied at the previous
            // trigger is rejected if it worsened the map residual
            if let Some(staged_norm) = self.accel.staged_norm() {
                let threshold = staged_norm * self.settings.core().acceleration_safeguard_factor;
                if !(f_norm <= threshold) {
                    self.variables.set_accel_vector(self.accel.fallback());
                    self.accel.reject();
                    self.info.save_accel_rejection();
                    return;
                }
                self.accel.accept();
            }

            self.accel.update(
                self.variables.accel_vector_prev(),
                self.variables.accel_vector(),
            );

            if iter % self.settings.core().acceleration_interval == 0 {
                // borrow dance: candidate is computed first, then applied
                if self.accel.accelerate().is_some() {
                    self.accel.stage(f_norm);
                    let Self {
                        ref accel,
                        ref mut variables,
                        ..
                    } = *self;
                    variables.set_accel_vector(accel.candidate());
                }
            }
        }

        fn checkpoint_residuals(&mut self, iter: u32, timers: &Timers) {
            self.residuals.update(&self.variables, &self.data, iter);
            self.info
                .update(&self.data, &self.variables, &self.residuals, timers, iter);
        }

        fn time_limit_reached(&self, timers: &Timers) -> bool {
            let limit = self.settings.core().time_limit;
            limit > 0.0 && timers.elapsed("solve").as_secs_f64() > limit
        }
    }
}
