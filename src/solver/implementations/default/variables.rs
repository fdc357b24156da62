use super::*;
use crate::algebra::*;
use crate::solver::core::{
    cones::{CompositeCone, Cone},
    traits::Variables,
};

// ---------------
// variables for the embedded iterate pair
// ---------------

/// Standard-form solver type implementing the [`Variables`](crate::solver::core::traits::Variables) trait

// The embedded iterate is u = (x, y, tau) of length n + m + 1, with
// the dual vector v = (0, s, kappa) of the same length.   After every
// iteration the pair satisfies the splitting optimality decomposition,
// with v_x identically zero.

pub struct DefaultVariables<T> {
    /// primal iterate of the embedding
    pub u: Vec<T>,
    /// dual iterate of the embedding
    pub v: Vec<T>,

    //post linear solve point, also used as projection workspace
    pub(crate) u_t: Vec<T>,

    //lagged copy of v for the fixed point residual
    pub(crate) v_prev: Vec<T>,

    pub(crate) n: usize,
    pub(crate) m: usize,
}

impl<T> DefaultVariables<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        let len = n + m + 1;
        Self {
            u: vec![T::zero(); len],
            v: vec![T::zero(); len],
            u_t: vec![T::zero(); len],
            v_prev: vec![T::zero(); len],
            n,
            m,
        }
    }

    //index of the homogenization variable
    pub(crate) fn tau_idx(&self) -> usize {
        self.n + self.m
    }

    /// current value of the homogenization variable
    pub fn tau(&self) -> T {
        self.u[self.tau_idx()]
    }

    /// current value of the complementary homogenization variable
    pub fn kappa(&self) -> T {
        self.v[self.tau_idx()]
    }
}

impl<T> Variables<T> for DefaultVariables<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type C = CompositeCone<T>;
    type SE = DefaultSettings<T>;

    fn cold_start(&mut self) {
        let ti = self.tau_idx();
        self.u.set(T::zero());
        self.v.set(T::zero());
        self.u[ti] = T::one(); //tau
        self.v[ti] = T::one(); //kappa
        self.v_prev.copy_from(&self.v);
    }

    fn save_prev(&mut self) {
        self.v_prev.copy_from(&self.v);
    }

    fn relax_and_project(&mut self, cones: &mut CompositeCone<T>, rho_x: T, rho_y: &[T], α: T) {
        let (n, ti) = (self.n, self.tau_idx());

        // u_t holds the post linear solve point.   over-relax into u
        self.u.axpby(α, &self.u_t, T::one() - α);

        // u_t <- relaxed point minus the metric-scaled dual
        for i in 0..n {
            self.u_t[i] = self.u[i] - self.v[i] / rho_x;
        }
        for i in 0..self.m {
            self.u_t[n + i] = self.u[n + i] - self.v[n + i] / rho_y[i];
        }
        self.u_t[ti] = self.u[ti] - self.v[ti];

        // project onto the embedding cone: x free, y onto the dual
        // cones, tau nonnegative
        cones.project_dual(&mut self.u_t[n..ti]);
        self.u_t[ti] = T::max(self.u_t[ti], T::zero());

        // dual update v <- v + R(u+ - relaxed)
        for i in 0..n {
            self.v[i] += rho_x * (self.u_t[i] - self.u[i]);
        }
        for i in 0..self.m {
            self.v[n + i] += rho_y[i] * (self.u_t[n + i] - self.u[n + i]);
        }
        self.v[ti] += self.u_t[ti] - self.u[ti];

        // u_t becomes scratch, u the new iterate
        std::mem::swap(&mut self.u, &mut self.u_t);
    }

    fn fixed_point_residual(&self) -> T {
        self.v.dist(&self.v_prev)
    }

    fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }

    fn accel_vector(&self) -> &[T] {
        &self.v
    }

    fn accel_vector_prev(&self) -> &[T] {
        &self.v_prev
    }

    fn set_accel_vector(&mut self, v: &[T]) {
        self.v.copy_from(v);
    }
}
