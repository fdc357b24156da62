use super::{FactorizationError, LinSysSolver};
use crate::algebra::*;

/// Dense unpivoted LDL' factorization backend.
///
/// The subsystem matrix is quasidefinite for any `rho_x > 0` and
/// `rho_y > 0`, so the factorization exists without pivoting.  Suitable
/// for small and moderately sized problems.
pub struct DenseLdlSolver<T = f64> {
    n: usize,
    m: usize,
    rho_x: T,
    rho_y: Vec<T>,
    // static part of the subsystem matrix, column major, without the
    // rho diagonal terms
    kkt: Vec<T>,
    // unit lower factor with D on the diagonal
    fact: Vec<T>,
}

impl<T: FloatT> DenseLdlSolver<T> {
    pub fn new() -> Self {
        Self {
            n: 0,
            m: 0,
            rho_x: T::zero(),
            rho_y: Vec::new(),
            kkt: Vec::new(),
            fact: Vec::new(),
        }
    }

    fn dim(&self) -> usize {
        self.n + self.m
    }

    fn refactor(&mut self) -> Result<(), FactorizationError> {
        let nm = self.dim();
        self.fact.copy_from(&self.kkt);
        for i in 0..self.n {
            self.fact[i + i * nm] += self.rho_x;
        }
        for i in 0..self.m {
            let k = self.n + i;
            self.fact[k + k * nm] -= self.rho_y[i];
        }

        // unpivoted LDL', columnwise.  L is unit lower, D overwrites
        // the diagonal.
        let f = &mut self.fact;
        for j in 0..nm {
            let mut dj = f[j + j * nm];
            for k in 0..j {
                let ljk = f[j + k * nm];
                dj -= ljk * ljk * f[k + k * nm];
            }
            if dj == T::zero() || !dj.is_finite() {
                return Err(FactorizationError::NumericalError);
            }
            f[j + j * nm] = dj;
            for i in (j + 1)..nm {
                let mut s = f[i + j * nm];
                for k in 0..j {
                    s -= f[i + k * nm] * f[j + k * nm] * f[k + k * nm];
                }
                f[i + j * nm] = s / dj;
            }
        }
        Ok(())
    }
}

impl<T: FloatT> Default for DenseLdlSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatT> LinSysSolver<T> for DenseLdlSolver<T> {
    fn factorize(
        &mut self,
        a: &CscMatrix<T>,
        p: Option<&CscMatrix<T>>,
        rho_x: T,
        rho_y: &[T],
    ) -> Result<(), FactorizationError> {
        let (m, n) = (a.m, a.n);
        if rho_y.len() != m {
            return Err(FactorizationError::IncompatibleDimension);
        }
        if let Some(p) = p {
            if p.m != n || p.n != n {
                return Err(FactorizationError::IncompatibleDimension);
            }
        }

        self.n = n;
        self.m = m;
        self.rho_x = rho_x;
        self.rho_y = rho_y.to_vec();

        let nm = n + m;
        self.kkt = vec![T::zero(); nm * nm];
        self.fact = vec![T::zero(); nm * nm];

        // A into the off diagonal blocks
        for j in 0..n {
            for (i, v) in a.col_iter(j) {
                self.kkt[(n + i) + j * nm] = v;
                self.kkt[j + (n + i) * nm] = v;
            }
        }
        // upper triangle of P, symmetrically expanded
        if let Some(p) = p {
            for j in 0..n {
                for (i, v) in p.col_iter(j) {
                    self.kkt[i + j * nm] += v;
                    if i != j {
                        self.kkt[j + i * nm] += v;
                    }
                }
            }
        }

        self.refactor()
    }

    fn solve(&mut self, rhs: &mut [T], _warm_start: Option<&[T]>) {
        let nm = self.dim();
        debug_assert_eq!(rhs.len(), nm);
        let f = &self.fact;

        // forward substitution with unit lower L
        for i in 0..nm {
            let mut s = rhs[i];
            for k in 0..i {
                s -= f[i + k * nm] * rhs[k];
            }
            rhs[i] = s;
        }
        // diagonal
        for i in 0..nm {
            rhs[i] /= f[i + i * nm];
        }
        // backward substitution with L'
        for i in (0..nm).rev() {
            let mut s = rhs[i];
            for k in (i + 1)..nm {
                s -= f[k + i * nm] * rhs[k];
            }
            rhs[i] = s;
        }
    }

    fn update_rho(&mut self, rho_y: &[T]) -> Result<(), FactorizationError> {
        if rho_y.len() != self.m {
            return Err(FactorizationError::IncompatibleDimension);
        }
        self.rho_y.copy_from(rho_y);
        self.refactor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_system() -> (CscMatrix<f64>, CscMatrix<f64>) {
        // A = [1 1; 1 -1], P = 2*I (upper triangle)
        let a = CscMatrix::from(&[[1.0, 1.0], [1.0, -1.0]]);
        let p = CscMatrix::from(&[[2.0, 0.0], [0.0, 2.0]]);
        (a, p)
    }

    fn residual(
        a: &CscMatrix<f64>,
        p: &CscMatrix<f64>,
        rho_x: f64,
        rho_y: &[f64],
        x: &[f64],
        b: &[f64],
    ) -> f64 {
        let (m, n) = (a.m, a.n);
        let mut r = b.to_vec();
        for j in 0..n {
            for (i, v) in a.col_iter(j) {
                r[n + i] -= v * x[j];
                r[j] -= v * x[n + i];
            }
            for (i, v) in p.col_iter(j) {
                r[i] -= v * x[j];
                if i != j {
                    r[j] -= v * x[i];
                }
            }
            r[j] -= rho_x * x[j];
        }
        for i in 0..m {
            r[n + i] += rho_y[i] * x[n + i];
        }
        r.norm_inf()
    }

    #[test]
    fn test_factor_and_solve() {
        let (a, p) = test_system();
        let rho_y = [0.5, 0.25];
        let mut ldl = DenseLdlSolver::<f64>::new();
        ldl.factorize(&a, Some(&p), 1e-3, &rho_y).unwrap();

        let b = [1.0, 2.0, 3.0, -1.0];
        let mut x = b;
        ldl.solve(&mut x, None);
        assert!(residual(&a, &p, 1e-3, &rho_y, &x, &b) < 1e-10);
    }

    #[test]
    fn test_no_quadratic_term() {
        let (a, _) = test_system();
        let rho_y = [1.0, 1.0];
        let mut ldl = DenseLdlSolver::<f64>::new();
        ldl.factorize(&a, None, 1.0, &rho_y).unwrap();

        let zero = CscMatrix::<f64>::zeros((2, 2));
        let b = [1.0, 0.0, 0.0, 1.0];
        let mut x = b;
        ldl.solve(&mut x, None);
        assert!(residual(&a, &zero, 1.0, &rho_y, &x, &b) < 1e-10);
    }

    #[test]
    fn test_update_rho() {
        let (a, p) = test_system();
        let mut ldl = DenseLdlSolver::<f64>::new();
        ldl.factorize(&a, Some(&p), 1e-3, &[0.5, 0.5]).unwrap();

        let rho_new = [2.0, 4.0];
        ldl.update_rho(&rho_new).unwrap();

        let b = [0.5, -1.0, 2.0, 1.0];
        let mut x = b;
        ldl.solve(&mut x, None);
        assert!(residual(&a, &p, 1e-3, &rho_new, &x, &b) < 1e-10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let (a, p) = test_system();
        let mut ldl = DenseLdlSolver::<f64>::new();
        assert!(ldl.factorize(&a, Some(&p), 1.0, &[1.0]).is_err());
    }
}
