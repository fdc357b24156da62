use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::{traits::Info, SolverStatus};
use crate::timers::*;
use std::fs::File;
use std::io::Write;

/// Standard-form solver type implementing the [`Info`](crate::solver::core::traits::Info) and [`InfoPrint`](crate::solver::core::traits::InfoPrint) traits

#[derive(Debug, Default)]
pub struct DefaultInfo<T> {
    pub iterations: u32,
    pub cost_primal: T,
    pub cost_dual: T,
    pub res_primal: T,
    pub res_dual: T,
    pub gap_abs: T,
    pub gap_rel: T,
    pub tau: T,
    pub kappa: T,
    /// current scale factor of the splitting metric
    pub scale: T,
    /// number of adaptive rescalings so far
    pub scale_updates: u32,
    /// number of safeguard-rejected acceleration candidates
    pub accel_rejections: u32,
    pub solve_time: f64,
    pub status: SolverStatus,

    // data norms needed by the certificate checks
    norm_b: T,
    norm_c: T,

    pub(crate) stream: PrintTarget,
    csv: Option<File>,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Info<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type R = DefaultResiduals<T>;

    fn reset(&mut self, timers: &mut Timers, settings: &DefaultSettings<T>) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.solve_time = 0f64;
        self.scale = settings.scale;
        self.scale_updates = 0;
        self.accel_rejections = 0;

        timers.reset_timer("solve");

        // per-refresh progress log.  a file that cannot be opened
        // just disables logging
        self.csv = settings.log_csv_filename.as_ref().and_then(|path| {
            let mut f = File::create(path).ok()?;
            writeln!(
                f,
                "iter,pcost,dcost,pres,dres,gap,tau,kappa,scale,time_sec"
            )
            .ok()?;
            Some(f)
        });
    }

    fn update(
        &mut self,
        data: &DefaultProblemData<T>,
        _variables: &DefaultVariables<T>,
        residuals: &DefaultResiduals<T>,
        timers: &Timers,
        iter: u32,
    ) {
        self.iterations = iter;
        self.tau = residuals.tau;
        self.kappa = residuals.kappa;
        self.norm_b = data.norm_b_orig;
        self.norm_c = data.norm_c_orig;

        // costs and residuals are reported pre-homogenization, so
        // they are only meaningful while tau remains positive
        if residuals.tau > T::zero() {
            let tinv = T::recip(residuals.tau);
            let half: T = (0.5).as_T();
            let x_px_over2 = residuals.xPx * tinv * tinv * half;

            self.cost_primal = residuals.ctx * tinv + x_px_over2;
            self.cost_dual = -residuals.bty * tinv - x_px_over2;

            self.res_primal = residuals.norm_pri * tinv;
            self.res_dual = residuals.norm_dual * tinv;

            self.gap_abs = T::abs(self.cost_primal - self.cost_dual);
            self.gap_rel = self.gap_abs
                / T::max(
                    T::one(),
                    T::max(T::abs(self.cost_primal), T::abs(self.cost_dual)),
                );
        } else {
            self.cost_primal = T::nan();
            self.cost_dual = T::nan();
            self.res_primal = T::nan();
            self.res_dual = T::nan();
            self.gap_abs = T::nan();
            self.gap_rel = T::nan();
        }

        // the "solve" timer is still open here, so read its running
        // elapsed time rather than the banked total
        self.solve_time = timers.elapsed("solve").as_secs_f64();

        if let Some(f) = self.csv.as_mut() {
            writeln!(
                f,
                "{},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e},{:e}",
                self.iterations,
                self.cost_primal,
                self.cost_dual,
                self.res_primal,
                self.res_dual,
                self.gap_abs,
                self.tau,
                self.kappa,
                self.scale,
                self.solve_time
            )
            .ok();
        }
    }

    fn check_termination(
        &mut self,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
        iter: u32,
    ) -> bool {
        //  optimality or a certificate at full tolerance
        // ---------------------
        self.check_convergence_full(residuals, settings);

        // iteration limit.   the time limit is polled separately in
        // the main loop so that it is honored between checks too
        // ----------------------
        if self.status == SolverStatus::Unsolved && iter >= settings.max_iters {
            self.status = SolverStatus::MaxIterations;
        }

        // return TRUE if we settled on a final status
        self.status != SolverStatus::Unsolved
    }

    fn finalize(
        &mut self,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
        timers: &mut Timers,
    ) {
        // on a limit stop, check whether the last iterate qualifies at
        // the reduced tolerances.  interrupted and failed solves keep
        // their status
        let soft_stop = matches!(
            self.status,
            SolverStatus::MaxIterations | SolverStatus::TimeLimit
        );

        if soft_stop && residuals.is_fresh() {
            self.check_convergence_almost(residuals, settings);
        }

        self.solve_time = timers.elapsed("solve").as_secs_f64();
    }

    fn save_scale_update(&mut self, scale: T) {
        self.scale = scale;
        self.scale_updates += 1;
    }

    fn save_accel_rejection(&mut self) {
        self.accel_rejections += 1;
    }

    fn get_status(&self) -> SolverStatus {
        self.status
    }

    fn set_status(&mut self, status: SolverStatus) {
        self.status = status;
    }
}

// Utility functions for convergence checking

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    fn check_convergence_full(
        &mut self,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
    ) {
        self.check_convergence(
            residuals,
            settings.eps_abs,
            settings.eps_rel,
            settings.eps_infeas,
            SolverStatus::Solved,
            SolverStatus::Infeasible,
            SolverStatus::Unbounded,
        );
    }

    fn check_convergence_almost(
        &mut self,
        residuals: &DefaultResiduals<T>,
        settings: &DefaultSettings<T>,
    ) {
        self.check_convergence(
            residuals,
            settings.reduced_eps_abs,
            settings.reduced_eps_rel,
            settings.reduced_eps_infeas,
            SolverStatus::SolvedInaccurate,
            SolverStatus::InfeasibleInaccurate,
            SolverStatus::UnboundedInaccurate,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn check_convergence(
        &mut self,
        residuals: &DefaultResiduals<T>,
        eps_abs: T,
        eps_rel: T,
        eps_infeas: T,
        solved_status: SolverStatus,
        pinf_status: SolverStatus,
        dinf_status: SolverStatus,
    ) {
        if residuals.tau > T::zero() && self.is_solved(residuals, eps_abs, eps_rel) {
            self.status = solved_status;
        } else if self.is_primal_infeasible(residuals, eps_infeas) {
            self.status = pinf_status;
        } else if self.is_unbounded(residuals, eps_infeas) {
            self.status = dinf_status;
        }
    }

    // all residual norms below are tau scaled, so the relative
    // criteria are scaled through by tau rather than dividing out
    fn is_solved(&self, residuals: &DefaultResiduals<T>, eps_abs: T, eps_rel: T) -> bool {
        let tau = residuals.tau;

        let pri_ok = residuals.norm_pri
            <= tau * eps_abs
                + eps_rel
                    * T::max(
                        residuals.norm_Ax,
                        T::max(residuals.norm_s, residuals.norm_btau),
                    );

        let dual_ok = residuals.norm_dual
            <= tau * eps_abs
                + eps_rel
                    * T::max(
                        residuals.norm_Px,
                        T::max(residuals.norm_Aty, residuals.norm_ctau),
                    );

        let gap_ok = self.gap_abs
            <= eps_abs
                + eps_rel * T::max(T::abs(self.cost_primal), T::abs(self.cost_dual));

        pri_ok && dual_ok && gap_ok
    }

    // certificates are scale invariant in the homogeneous embedding,
    // so no tau normalization is needed
    fn is_primal_infeasible(&self, residuals: &DefaultResiduals<T>, eps_infeas: T) -> bool {
        residuals.bty < T::zero()
            && residuals.norm_Aty * self.norm_b <= eps_infeas * (-residuals.bty)
    }

    fn is_unbounded(&self, residuals: &DefaultResiduals<T>, eps_infeas: T) -> bool {
        residuals.ctx < T::zero()
            && residuals.norm_Ax_plus_s * self.norm_c <= eps_infeas * (-residuals.ctx)
            && residuals.norm_Px * self.norm_c <= eps_infeas * (-residuals.ctx)
    }
}
