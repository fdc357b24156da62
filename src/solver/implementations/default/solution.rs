use super::*;
use crate::algebra::*;
use crate::solver::core::{
    traits::{Solution, Variables},
    SolverStatus,
};

/// Standard-form solver type implementing the [`Solution`](crate::solver::core::traits::Solution) trait

#[derive(Debug)]
pub struct DefaultSolution<T> {
    pub x: Vec<T>,
    pub y: Vec<T>,
    pub s: Vec<T>,
    pub status: SolverStatus,
    pub obj_val: T,
    pub obj_val_dual: T,
    pub iterations: u32,
    pub solve_time: f64,
    pub r_prim: T,
    pub r_dual: T,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            y: vec![T::zero(); m],
            s: vec![T::zero(); m],
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            obj_val_dual: T::nan(),
            iterations: 0,
            solve_time: 0f64,
            r_prim: T::nan(),
            r_dual: T::nan(),
        }
    }
}

impl<T> Solution<T> for DefaultSolution<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type I = DefaultInfo<T>;
    type SE = DefaultSettings<T>;

    fn warm_start(&self, variables: &mut DefaultVariables<T>, data: &DefaultProblemData<T>) {
        // certificate and failed solves leave NaNs behind, which must
        // not seed the next solve
        if !(self.x.is_finite() && self.y.is_finite() && self.s.is_finite()) {
            variables.cold_start();
            return;
        }

        let (n, m) = (data.n, data.m);
        let ti = n + m;
        let equil = &data.equilibration;
        let sp = equil.primal_scale;
        let sd = equil.dual_scale;

        // map the previous original-space solution back into the
        // normalized embedding at tau = 1
        for i in 0..n {
            variables.u[i] = sp * self.x[i] * equil.dinv[i];
            variables.v[i] = T::zero();
        }
        for i in 0..m {
            variables.u[n + i] = sd * self.y[i] * equil.einv[i];
            variables.v[n + i] = sp * self.s[i] * equil.e[i];
        }
        variables.u[ti] = T::one();
        variables.v[ti] = T::zero();
        variables.v_prev.copy_from(&variables.v);
    }

    fn finalize(
        &mut self,
        data: &DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        info: &DefaultInfo<T>,
        _settings: &DefaultSettings<T>,
    ) {
        let (n, m) = (data.n, data.m);
        let equil = &data.equilibration;
        let sp = equil.primal_scale;
        let sd = equil.dual_scale;
        let tau = variables.tau();

        self.status = info.status;
        self.iterations = info.iterations;
        self.solve_time = info.solve_time;
        self.r_prim = info.res_primal;
        self.r_dual = info.res_dual;

        // undo the equilibration.  division by tau, or the certificate
        // normalization, comes after
        for i in 0..n {
            self.x[i] = variables.u[i] * equil.d[i] / sp;
        }
        for i in 0..m {
            self.y[i] = variables.u[n + i] * equil.e[i] / sd;
            self.s[i] = variables.v[n + i] * equil.einv[i] / sp;
        }

        if self.status.is_certificate() {
            // certificates are rays, normalized so that b'y = -1 for
            // infeasibility and c'x = -1 for unboundedness
            self.obj_val = T::nan();
            self.obj_val_dual = T::nan();
            self.r_prim = T::nan();
            self.r_dual = T::nan();

            match self.status {
                SolverStatus::Infeasible | SolverStatus::InfeasibleInaccurate => {
                    let bty = data.b_orig.dot(&self.y);
                    let scale = -T::recip(bty);
                    self.y.scale(scale);
                    self.x.set(T::nan());
                    self.s.set(T::nan());
                }
                _ => {
                    let ctx = data.c_orig.dot(&self.x);
                    let scale = -T::recip(ctx);
                    self.x.scale(scale);
                    self.s.scale(scale);
                    self.y.set(T::nan());
                }
            }
        } else if tau > T::zero() {
            let tinv = T::recip(tau);
            self.x.scale(tinv);
            self.y.scale(tinv);
            self.s.scale(tinv);
            self.obj_val = info.cost_primal;
            self.obj_val_dual = info.cost_dual;
        } else {
            // no certificate and a vanishing homogenization variable,
            // so there is nothing meaningful to report
            self.x.set(T::nan());
            self.y.set(T::nan());
            self.s.set(T::nan());
            self.obj_val = T::nan();
            self.obj_val_dual = T::nan();
        }
    }
}
