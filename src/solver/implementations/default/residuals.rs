#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::traits::Residuals;

// ---------------
// Residuals type for default problem format
// ---------------

/// Standard-form solver type implementing the [`Residuals`](crate::solver::core::traits::Residuals) trait

// All norms and scalars below are reported in the original problem
// space, but remain scaled by the homogenization variable tau.
// Division by tau happens only when objective values and relative
// criteria are formed in the progress information.

pub struct DefaultResiduals<T> {
    // residual norms, original space, tau scaled
    pub(crate) norm_pri: T,  // ||Ax + s - b*tau||
    pub(crate) norm_dual: T, // ||Px + A'y + c*tau||

    // component norms appearing in the relative criteria
    pub(crate) norm_Ax: T,
    pub(crate) norm_s: T,
    pub(crate) norm_btau: T,
    pub(crate) norm_Px: T,
    pub(crate) norm_Aty: T,
    pub(crate) norm_ctau: T,

    // tau-free norm of Ax + s for the unboundedness certificate
    pub(crate) norm_Ax_plus_s: T,

    // objective scalars, original space, tau scaled
    pub(crate) ctx: T,
    pub(crate) bty: T,
    pub(crate) xPx: T,

    pub(crate) tau: T,
    pub(crate) kappa: T,

    // relative residuals in the normalized space, consumed by
    // adaptive rescaling
    pub(crate) rel_pri_nm: T,
    pub(crate) rel_dual_nm: T,

    // products and residual vectors in the normalized space
    pub(crate) Ax: Vec<T>,
    pub(crate) Px: Vec<T>,
    pub(crate) Aty: Vec<T>,
    work_m: Vec<T>,
    work_n: Vec<T>,

    // iteration tag of the most recent refresh
    last_iter: Option<u32>,
}

impl<T> DefaultResiduals<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            norm_pri: T::nan(),
            norm_dual: T::nan(),
            norm_Ax: T::zero(),
            norm_s: T::zero(),
            norm_btau: T::zero(),
            norm_Px: T::zero(),
            norm_Aty: T::zero(),
            norm_ctau: T::zero(),
            norm_Ax_plus_s: T::zero(),
            ctx: T::zero(),
            bty: T::zero(),
            xPx: T::zero(),
            tau: T::one(),
            kappa: T::one(),
            rel_pri_nm: T::one(),
            rel_dual_nm: T::one(),
            Ax: vec![T::zero(); m],
            Px: vec![T::zero(); n],
            Aty: vec![T::zero(); n],
            work_m: vec![T::zero(); m],
            work_n: vec![T::zero(); n],
            last_iter: None,
        }
    }

    /// true if residuals have been computed at least once
    pub(crate) fn is_fresh(&self) -> bool {
        self.last_iter.is_some()
    }
}

impl<T> Residuals<T> for DefaultResiduals<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;

    fn update(&mut self, variables: &DefaultVariables<T>, data: &DefaultProblemData<T>, iter: u32) {
        // a repeated refresh at the same iteration is a no-op
        if self.last_iter == Some(iter) {
            return;
        }
        self.last_iter = Some(iter);

        let (n, m) = (data.n, data.m);
        let ux = &variables.u[..n];
        let uy = &variables.u[n..n + m];
        let vy = &variables.v[n..n + m];
        let tau = variables.tau();
        let kappa = variables.kappa();

        self.tau = tau;
        self.kappa = kappa;

        // products in the normalized space
        data.A.gemv(&mut self.Ax, ux, T::one(), T::zero());
        data.P.symv(&mut self.Px, ux, T::one(), T::zero());
        data.A.gemv_t(&mut self.Aty, uy, T::one(), T::zero());

        // normalized primal residual Ax + s - b*tau and its relative
        // size, used only for the scale balance statistic
        for i in 0..m {
            self.work_m[i] = self.Ax[i] + vy[i] - data.b[i] * tau;
        }
        let max_pri_nm = T::max(
            self.Ax.norm(),
            T::max(vy.norm(), data.b.norm() * tau),
        );
        self.rel_pri_nm = self.work_m.norm() / (T::one() + max_pri_nm);

        // normalized dual residual Px + A'y + c*tau
        for j in 0..n {
            self.work_n[j] = self.Px[j] + self.Aty[j] + data.c[j] * tau;
        }
        let max_dual_nm = T::max(
            self.Px.norm(),
            T::max(self.Aty.norm(), data.c.norm() * tau),
        );
        self.rel_dual_nm = self.work_n.norm() / (T::one() + max_dual_nm);

        // undo the equilibration to report in the original space
        let equil = &data.equilibration;
        let sp = equil.primal_scale;
        let sd = equil.dual_scale;

        self.norm_pri = self.work_m.norm_scaled(&equil.einv) / sp;
        self.norm_Ax = self.Ax.norm_scaled(&equil.einv) / sp;
        self.norm_s = vy.norm_scaled(&equil.einv) / sp;
        self.norm_btau = data.norm_b_orig * tau;

        self.norm_dual = self.work_n.norm_scaled(&equil.dinv) / sd;
        self.norm_Px = self.Px.norm_scaled(&equil.dinv) / sd;
        self.norm_Aty = self.Aty.norm_scaled(&equil.dinv) / sd;
        self.norm_ctau = data.norm_c_orig * tau;

        for i in 0..m {
            self.work_m[i] = self.Ax[i] + vy[i];
        }
        self.norm_Ax_plus_s = self.work_m.norm_scaled(&equil.einv) / sp;

        // objective scalars
        let ss = sp * sd;
        self.ctx = data.c.dot(ux) / ss;
        self.bty = data.b.dot(uy) / ss;
        self.xPx = data.P.quad_form(ux, ux) / ss;
    }

    fn scale_ratio(&self) -> T {
        if self.rel_dual_nm > T::zero() {
            self.rel_pri_nm / self.rel_dual_nm
        } else {
            T::one()
        }
    }
}
