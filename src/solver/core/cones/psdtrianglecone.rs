use super::Cone;
use crate::algebra::*;

// -------------------------------------
// Positive Semidefinite Cone (scaled triangular form)
// -------------------------------------

// Matrices are vectorized in column major upper triangular order with
// off diagonal entries scaled by sqrt(2), so that inner products of
// vectorized matrices agree with the matrix trace inner product.

pub struct PSDTriangleCone<T> {
    n: usize,     //matrix side dimension
    numel: usize, //n(n+1)/2
    work: PSDConeWork<T>,
}

struct PSDConeWork<T> {
    a: Vec<T>,
    vecs: Vec<T>,
    vals: Vec<T>,
}

impl<T> PSDTriangleCone<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            n,
            numel: triangular_number(n),
            work: PSDConeWork {
                a: vec![T::zero(); n * n],
                vecs: vec![T::zero(); n * n],
                vals: vec![T::zero(); n],
            },
        }
    }
}

impl<T> Cone<T> for PSDTriangleCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.numel
    }

    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool {
        δ.copy_from(e);
        δ.recip();
        δ.scale(e.mean());
        true
    }

    fn project_dual(&mut self, z: &mut [T]) {
        //self dual.   project by clamping negative eigenvalues
        let n = self.n;
        if n == 0 {
            return;
        }
        if n == 1 {
            z[0] = T::max(z[0], T::zero());
            return;
        }

        let PSDConeWork { a, vecs, vals } = &mut self.work;
        svec_to_mat(a, z, n);

        //the sweep limit is not reached for symmetric input, but if the
        //decomposition were to fail we leave the block unmodified
        if crate::algebra::dense::sym_jacobi_eigen(a, vecs, vals, n).is_err() {
            return;
        }

        //reconstruct the positive part into the upper triangle of a
        a.set(T::zero());
        for k in 0..n {
            let wk = vals[k];
            if wk <= T::zero() {
                continue;
            }
            for j in 0..n {
                for i in 0..=j {
                    a[i + j * n] += wk * vecs[i + k * n] * vecs[j + k * n];
                }
            }
        }
        mat_to_svec(z, a, n);
    }
}

fn svec_to_mat<T: FloatT>(a: &mut [T], x: &[T], n: usize) {
    let isqrt2 = T::recip(T::SQRT_2());
    let mut idx = 0;
    for j in 0..n {
        for i in 0..=j {
            if i == j {
                a[i + j * n] = x[idx];
            } else {
                a[i + j * n] = x[idx] * isqrt2;
                a[j + i * n] = x[idx] * isqrt2;
            }
            idx += 1;
        }
    }
}

fn mat_to_svec<T: FloatT>(x: &mut [T], a: &[T], n: usize) {
    let sqrt2 = T::SQRT_2();
    let mut idx = 0;
    for j in 0..n {
        for i in 0..=j {
            x[idx] = if i == j {
                a[i + j * n]
            } else {
                a[i + j * n] * sqrt2
            };
            idx += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svec_roundtrip() {
        let n = 3;
        let x: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut a = vec![0.0; n * n];
        let mut y = [0.0; 6];
        svec_to_mat(&mut a, &x, n);
        mat_to_svec(&mut y, &a, n);
        for i in 0..6 {
            assert!((x[i] - y[i]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_project_diagonal() {
        //diag(1,-1) in svec form
        let mut cone = PSDTriangleCone::<f64>::new(2);
        let mut z = [1.0, 0.0, -1.0];
        cone.project_dual(&mut z);
        assert!((z[0] - 1.0).abs() < 1e-12);
        assert!(z[1].abs() < 1e-12);
        assert!(z[2].abs() < 1e-12);
    }

    #[test]
    fn test_project_psd_fixed_point() {
        //a matrix that is already PSD is unchanged
        let mut cone = PSDTriangleCone::<f64>::new(2);
        //[[2,1],[1,2]] in svec form
        let sqrt2 = std::f64::consts::SQRT_2;
        let mut z = [2.0, sqrt2, 2.0];
        cone.project_dual(&mut z);
        assert!((z[0] - 2.0).abs() < 1e-10);
        assert!((z[1] - sqrt2).abs() < 1e-10);
        assert!((z[2] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_project_rank_one() {
        //[[1,2],[2,1]] has eigenvalues 3 and -1, positive part is
        //0.5*[[3,3],[3,3]] + ... check against direct computation
        let sqrt2 = std::f64::consts::SQRT_2;
        let mut cone = PSDTriangleCone::<f64>::new(2);
        let mut z = [1.0, 2.0 * sqrt2, 1.0];
        cone.project_dual(&mut z);
        //positive part is 1.5 * [[1,1],[1,1]]
        assert!((z[0] - 1.5).abs() < 1e-10);
        assert!((z[1] - 1.5 * sqrt2).abs() < 1e-10);
        assert!((z[2] - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_scalar_cone() {
        let mut cone = PSDTriangleCone::<f64>::new(1);
        let mut z = [-2.0];
        cone.project_dual(&mut z);
        assert_eq!(z[0], 0.0);
    }
}
