//! Minimal dense kernels: a cyclic Jacobi eigensolver for small symmetric
//! matrices and an unblocked Cholesky factorization.  Matrices are stored
//! column major in flat slices.

use crate::algebra::{AsFloatT, DenseFactorizationError, FloatT, VectorMath};

const JACOBI_MAX_SWEEPS: usize = 50;

/// Eigendecomposition of the symmetric matrix `a` (n x n, column major)
/// by cyclic Jacobi sweeps.  On return `a` is destroyed, `v` holds the
/// eigenvectors columnwise and `w` the eigenvalues.
pub(crate) fn sym_jacobi_eigen<T: FloatT>(
    a: &mut [T],
    v: &mut [T],
    w: &mut [T],
    n: usize,
) -> Result<(), DenseFactorizationError> {
    if a.len() != n * n || v.len() != n * n || w.len() != n {
        return Err(DenseFactorizationError::IncompatibleDimension);
    }

    // v = I
    v.set(T::zero());
    for i in 0..n {
        v[i + i * n] = T::one();
    }

    if n <= 1 {
        if n == 1 {
            w[0] = a[0];
        }
        return Ok(());
    }

    let anorm = a.norm_inf();
    if anorm == T::zero() {
        w.set(T::zero());
        return Ok(());
    }
    let tol = T::epsilon() * anorm;

    for _sweep in 0..JACOBI_MAX_SWEEPS {
        let mut offdiag = T::zero();
        for q in 1..n {
            for p in 0..q {
                offdiag = T::max(offdiag, T::abs(a[p + q * n]));
            }
        }
        if offdiag <= tol {
            for i in 0..n {
                w[i] = a[i + i * n];
            }
            return Ok(());
        }

        for q in 1..n {
            for p in 0..q {
                let apq = a[p + q * n];
                if T::abs(apq) <= tol {
                    continue;
                }
                let two: T = (2.0).as_T();
                let theta = (a[q + q * n] - a[p + p * n]) / (two * apq);
                let t = {
                    let tabs = T::abs(theta) + T::sqrt(theta * theta + T::one());
                    if theta >= T::zero() {
                        T::recip(tabs)
                    } else {
                        -T::recip(tabs)
                    }
                };
                let c = T::recip(T::sqrt(t * t + T::one()));
                let s = t * c;

                // rotate rows/columns p and q of a
                for k in 0..n {
                    let akp = a[k + p * n];
                    let akq = a[k + q * n];
                    a[k + p * n] = c * akp - s * akq;
                    a[k + q * n] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p + k * n];
                    let aqk = a[q + k * n];
                    a[p + k * n] = c * apk - s * aqk;
                    a[q + k * n] = s * apk + c * aqk;
                }
                // accumulate eigenvectors
                for k in 0..n {
                    let vkp = v[k + p * n];
                    let vkq = v[k + q * n];
                    v[k + p * n] = c * vkp - s * vkq;
                    v[k + q * n] = s * vkp + c * vkq;
                }
            }
        }
    }
    Err(DenseFactorizationError::Eigen)
}

/// In-place lower Cholesky factorization of the symmetric positive
/// definite matrix `a` (n x n, column major, lower triangle referenced).
pub(crate) fn cholesky_factor<T: FloatT>(
    a: &mut [T],
    n: usize,
) -> Result<(), DenseFactorizationError> {
    if a.len() != n * n {
        return Err(DenseFactorizationError::IncompatibleDimension);
    }
    for j in 0..n {
        let mut d = a[j + j * n];
        for k in 0..j {
            d -= a[j + k * n] * a[j + k * n];
        }
        if d <= T::zero() || !d.is_finite() {
            return Err(DenseFactorizationError::Cholesky);
        }
        let ljj = T::sqrt(d);
        a[j + j * n] = ljj;
        for i in (j + 1)..n {
            let mut s = a[i + j * n];
            for k in 0..j {
                s -= a[i + k * n] * a[j + k * n];
            }
            a[i + j * n] = s / ljj;
        }
    }
    Ok(())
}

/// Solve L*L'*x = b in place given the factor from
/// [`cholesky_factor`].
pub(crate) fn cholesky_solve<T: FloatT>(l: &[T], n: usize, b: &mut [T]) {
    assert_eq!(l.len(), n * n);
    assert_eq!(b.len(), n);
    // forward
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= l[i + k * n] * b[k];
        }
        b[i] = s / l[i + i * n];
    }
    // backward
    for i in (0..n).rev() {
        let mut s = b[i];
        for k in (i + 1)..n {
            s -= l[k + i * n] * b[k];
        }
        b[i] = s / l[i + i * n];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jacobi_eigen_2x2() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3
        let mut a: Vec<f64> = vec![2.0, 1.0, 1.0, 2.0];
        let mut v = vec![0.0; 4];
        let mut w = vec![0.0; 2];
        sym_jacobi_eigen(&mut a, &mut v, &mut w, 2).unwrap();
        w.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((w[0] - 1.0).abs() < 1e-12);
        assert!((w[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_jacobi_eigen_reconstruct() {
        let n = 3;
        let mut a: Vec<f64> = vec![4.0, 1.0, -2.0, 1.0, 2.0, 0.0, -2.0, 0.0, 3.0];
        let acopy = a.clone();
        let mut v = vec![0.0; n * n];
        let mut w = vec![0.0; n];
        sym_jacobi_eigen(&mut a, &mut v, &mut w, n).unwrap();

        // check A*vk = wk*vk for each eigenpair
        for k in 0..n {
            for i in 0..n {
                let mut av = 0.0;
                for j in 0..n {
                    av += acopy[i + j * n] * v[j + k * n];
                }
                assert!((av - w[k] * v[i + k * n]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_cholesky_solve() {
        let n = 2;
        // [[4, 2], [2, 3]]
        let mut a: Vec<f64> = vec![4.0, 2.0, 2.0, 3.0];
        cholesky_factor(&mut a, n).unwrap();
        let mut b = vec![10.0, 8.0];
        cholesky_solve(&a, n, &mut b);
        // solution of [[4,2],[2,3]] x = [10, 8]
        assert!((b[0] - 1.75).abs() < 1e-12);
        assert!((b[1] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_cholesky_not_pd() {
        let mut a = vec![1.0, 2.0, 2.0, 1.0];
        assert!(cholesky_factor(&mut a, 2).is_err());
    }
}
