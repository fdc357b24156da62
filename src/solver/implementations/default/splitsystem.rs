#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::{
    cones::CompositeCone,
    linsys::{DenseLdlSolver, FactorizationError, LinSysSolver},
    traits::SplitSystem,
};

// ---------------
// linear stage of the splitting iteration
// ---------------

/// Standard-form solver type implementing the [`SplitSystem`](crate::solver::core::traits::SplitSystem) trait

// Owns the factorization of the quasidefinite subsystem matrix and the
// rank one homogenization correction.   The post linear solve point
// solves (R + Q) u_t = R u + v, reduced to the subsystem by eliminating
// the tau row against the cached vector g = M^{-1} (c, -b).

pub struct DefaultSplitSystem<T> {
    ldl: Box<dyn LinSysSolver<T>>,

    // cached g = M^{-1}(c, -b) and denominator 1 + h'g of the rank
    // one correction, refreshed whenever b, c or rho change
    g: Vec<T>,
    denom: T,

    rho_x: T,
    rho_y: Vec<T>,
    base_rho: Vec<T>,
    scale: T,

    // adaptive scaling statistics
    sum_log: T,
    n_log: u32,
    last_scale_update_iter: u32,

    work: Vec<T>,
    n: usize,
    m: usize,
}

impl<T> DefaultSplitSystem<T>
where
    T: FloatT,
{
    pub fn new(
        data: &DefaultProblemData<T>,
        cones: &CompositeCone<T>,
        settings: &DefaultSettings<T>,
    ) -> Result<Self, FactorizationError> {
        let (n, m) = (data.n, data.m);

        let mut ldl: Box<dyn LinSysSolver<T>> = match settings.direct_solve_method.as_str() {
            "denseldl" => Box::new(DenseLdlSolver::<T>::new()),
            other => return Err(FactorizationError::UnknownMethod(other.to_string())),
        };

        let scale = settings.scale;
        let rho_x = settings.rho_x;
        let base_rho = cones.rho_y_base(settings.rho_zero_ratio);
        let mut rho_y = base_rho.clone();
        rho_y.scale(T::recip(scale));

        let P = if data.P.nnz() > 0 { Some(&data.P) } else { None };
        ldl.factorize(&data.A, P, rho_x, &rho_y)?;

        Ok(Self {
            ldl,
            g: vec![T::zero(); n + m],
            denom: T::one(),
            rho_x,
            rho_y,
            base_rho,
            scale,
            sum_log: T::zero(),
            n_log: 0,
            last_scale_update_iter: 0,
            work: vec![T::zero(); n + m],
            n,
            m,
        })
    }

    // refresh g and the rank one denominator from the current
    // factorization and normalized vectors
    fn compute_g(&mut self, data: &DefaultProblemData<T>) -> bool {
        let n = self.n;
        self.g[..n].copy_from(&data.c);
        for (gi, &bi) in self.g[n..].iter_mut().zip(data.b.iter()) {
            *gi = -bi;
        }
        self.ldl.solve(&mut self.g, None);

        self.denom = T::one() + data.c.dot(&self.g[..n]) + data.b.dot(&self.g[n..]);

        self.g.is_finite() && self.denom > T::zero()
    }
}

impl<T> SplitSystem<T> for DefaultSplitSystem<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn update_constants(&mut self, data: &DefaultProblemData<T>) -> bool {
        self.compute_g(data)
    }

    fn solve(&mut self, variables: &mut DefaultVariables<T>, data: &DefaultProblemData<T>) -> bool {
        let (n, m) = (self.n, self.m);
        let ti = n + m;
        let u = &variables.u;
        let v = &variables.v;

        // omega = R u + v, with the tau component eliminated from the
        // subsystem right hand side
        let w_tau = u[ti] + v[ti];
        let rhs = &mut self.work;
        for i in 0..n {
            rhs[i] = self.rho_x * u[i] + v[i] - w_tau * data.c[i];
        }
        for i in 0..m {
            rhs[n + i] = -(self.rho_y[i] * u[n + i] + v[n + i] - w_tau * data.b[i]);
        }

        self.ldl.solve(rhs, Some(&variables.u_t[..ti]));

        // rank one correction for the homogenization row
        let hq = data.c.dot(&rhs[..n]) + data.b.dot(&rhs[n..]);
        let coef = hq / self.denom;

        let u_t = &mut variables.u_t;
        for i in 0..ti {
            u_t[i] = rhs[i] - coef * self.g[i];
        }
        u_t[ti] = w_tau + data.c.dot(&u_t[..n]) + data.b.dot(&u_t[n..ti]);

        u_t.is_finite()
    }

    fn rho_x(&self) -> T {
        self.rho_x
    }

    fn rho_y(&self) -> &[T] {
        &self.rho_y
    }

    fn scale(&self) -> T {
        self.scale
    }

    fn adapt_scale(
        &mut self,
        ratio: T,
        iter: u32,
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) -> Option<T> {
        // accumulate the log of the residual balance at every refresh
        if ratio.is_finite() && ratio > T::zero() {
            self.sum_log += T::ln(T::sqrt(ratio));
            self.n_log += 1;
        }

        if iter - self.last_scale_update_iter < settings.adaptive_scale_interval {
            return None;
        }
        self.last_scale_update_iter = iter;

        if self.n_log == 0 {
            return None;
        }
        let mean_log = self.sum_log / (self.n_log).as_T();
        self.sum_log = T::zero();
        self.n_log = 0;

        // geometric mean of sqrt(pri/dual), with a bounded step
        let factor = T::exp(mean_log).clip(
            (0.1).as_T(),
            (10.0).as_T(),
            (0.1).as_T(),
            (10.0).as_T(),
        );

        // leave the scale alone while the balance stays inside the band
        let band = settings.adaptive_scale_band;
        if factor <= band && factor >= T::recip(band) {
            return None;
        }

        let new_scale = T::max(
            settings.scale_min,
            T::min(settings.scale_max, self.scale * factor),
        );
        if new_scale == self.scale {
            return None;
        }
        let old_scale = self.scale;
        self.scale = new_scale;

        for (r, &base) in self.rho_y.iter_mut().zip(self.base_rho.iter()) {
            *r = base / new_scale;
        }

        if self.ldl.update_rho(&self.rho_y).is_err() {
            // restore the previous metric.  the matrix is quasidefinite
            // for any positive weights, so this is not expected to occur
            self.scale = old_scale;
            for (r, &base) in self.rho_y.iter_mut().zip(self.base_rho.iter()) {
                *r = base / old_scale;
            }
            let _ = self.ldl.update_rho(&self.rho_y);
            return None;
        }
        self.compute_g(data);

        Some(new_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::core::traits::{ProblemData, Variables};
    use crate::solver::SupportedConeT;

    fn make_parts() -> (
        DefaultProblemData<f64>,
        CompositeCone<f64>,
        DefaultSettings<f64>,
    ) {
        let P = CscMatrix::from(&[
            [2.0, 0.0], //
            [0.0, 2.0],
        ]);
        let A = CscMatrix::from(&[
            [1.0, 1.0], //
            [1.0, 0.0],
            [0.0, 1.0],
        ]);
        let c = [1.0, -1.0];
        let b = [1.0, 2.0, 2.0];
        let mut data = DefaultProblemData::new(&P, &c, &A, &b);
        let cones = CompositeCone::new(&[
            SupportedConeT::ZeroConeT(1),
            SupportedConeT::NonnegativeConeT(2),
        ])
        .unwrap();
        let settings = DefaultSettings::default();
        data.equilibrate(&cones, &settings);
        (data, cones, settings)
    }

    // residual of the full embedded system (R + Q) u_t = R u + v
    fn embedded_residual(
        sys: &DefaultSplitSystem<f64>,
        data: &DefaultProblemData<f64>,
        u: &[f64],
        v: &[f64],
        u_t: &[f64],
    ) -> f64 {
        let (n, m) = (data.n, data.m);
        let ti = n + m;
        let mut r = vec![0.0; ti + 1];

        // x rows: (rho_x + P) x + A'y + c*tau
        data.P.symv(&mut r[..n], &u_t[..n], 1.0, 0.0);
        data.A.gemv_t(&mut r[..n], &u_t[n..ti], 1.0, 1.0);
        for i in 0..n {
            r[i] += sys.rho_x * u_t[i] + data.c[i] * u_t[ti];
            r[i] -= sys.rho_x * u[i] + v[i];
        }
        // y rows: -A x + rho_y y + b*tau
        let mut ax = vec![0.0; m];
        data.A.gemv(&mut ax, &u_t[..n], 1.0, 0.0);
        for i in 0..m {
            r[n + i] = -ax[i] + sys.rho_y[i] * u_t[n + i] + data.b[i] * u_t[ti];
            r[n + i] -= sys.rho_y[i] * u[n + i] + v[n + i];
        }
        // tau row: -c'x - b'y + tau
        r[ti] = u_t[ti] - data.c.dot(&u_t[..n]) - data.b.dot(&u_t[n..ti]);
        r[ti] -= u[ti] + v[ti];

        r.norm_inf()
    }

    #[test]
    fn test_solve_satisfies_embedded_system() {
        let (data, cones, settings) = make_parts();
        let mut sys = DefaultSplitSystem::new(&data, &cones, &settings).unwrap();
        assert!(sys.update_constants(&data));
        assert!(sys.denom > 1.0);

        let mut vars = DefaultVariables::new(2, 3);
        vars.cold_start();
        vars.u.copy_from(&vec![0.3, -0.2, 0.5, 0.1, -0.4, 1.0]);
        vars.v.copy_from(&vec![0.0, 0.0, 0.2, -0.1, 0.3, 0.8]);

        assert!(sys.solve(&mut vars, &data));
        let res = embedded_residual(&sys, &data, &vars.u, &vars.v, &vars.u_t);
        assert!(res < 1e-10, "residual {}", res);
    }

    #[test]
    fn test_zero_rows_get_smaller_rho() {
        let (data, cones, settings) = make_parts();
        let sys = DefaultSplitSystem::new(&data, &cones, &settings).unwrap();
        assert!(sys.rho_y()[0] < sys.rho_y()[1]);
        assert_eq!(sys.rho_y()[1], sys.rho_y()[2]);
    }

    #[test]
    fn test_adapt_scale_updates_metric() {
        let (data, cones, settings) = make_parts();
        let mut sys = DefaultSplitSystem::new(&data, &cones, &settings).unwrap();
        assert!(sys.update_constants(&data));

        let old_scale = sys.scale();
        let old_rho = sys.rho_y()[1];

        // feed a strongly unbalanced ratio until the interval elapses
        let mut updated = None;
        for iter in 1..=settings.adaptive_scale_interval + 1 {
            updated = sys.adapt_scale(100.0, iter, &data, &settings);
            if updated.is_some() {
                break;
            }
        }
        let new_scale = updated.unwrap();
        assert!(new_scale > old_scale);
        assert!(sys.rho_y()[1] < old_rho);

        // solutions remain consistent with the updated metric
        let mut vars = DefaultVariables::new(2, 3);
        vars.cold_start();
        assert!(sys.solve(&mut vars, &data));
        let res = embedded_residual(&sys, &data, &vars.u, &vars.v, &vars.u_t);
        assert!(res < 1e-10, "residual {}", res);
    }

    #[test]
    fn test_unknown_method() {
        let (data, cones, mut settings) = make_parts();
        settings.direct_solve_method = "foo".to_string();
        assert!(DefaultSplitSystem::new(&data, &cones, &settings).is_err());
    }
}
