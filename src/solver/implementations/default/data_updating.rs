use super::DefaultSolver;
use crate::algebra::*;
use crate::solver::utils::infbounds::get_infinity;
use thiserror::Error;

/// Error type returned by the user data update utilities
#[derive(Error, Debug)]
pub enum DataUpdateError {
    /// Replacement data has the wrong length
    #[error("Replacement data for '{0}' has the wrong length")]
    BadLength(&'static str),
}

// Only the b and c vectors can be replaced between solves.  Matrix
// updates would invalidate both the equilibration and the cached
// factorization, so a new problem requires a new solver object.

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    /// Overwrites the `b` vector data in an existing solver object.
    /// No action is taken if the input is empty.   The update takes
    /// effect at the start of the next solve, with the equilibration
    /// and factorization left untouched.
    pub fn update_b(&mut self, b: &[T]) -> Result<(), DataUpdateError> {
        if b.is_empty() {
            return Ok(());
        }
        if b.len() != self.data.m {
            return Err(DataUpdateError::BadLength("b"));
        }
        let infbound: T = get_infinity().as_T();
        for (bi, &v) in self.data.b_orig.iter_mut().zip(b.iter()) {
            *bi = T::min(v, infbound);
        }
        Ok(())
    }

    /// Overwrites the `c` vector data in an existing solver object.
    /// No action is taken if the input is empty.
    pub fn update_c(&mut self, c: &[T]) -> Result<(), DataUpdateError> {
        if c.is_empty() {
            return Ok(());
        }
        if c.len() != self.data.n {
            return Err(DataUpdateError::BadLength("c"));
        }
        self.data.c_orig.copy_from(c);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::implementations::default::*;
    use crate::solver::SupportedConeT;

    fn test_solver() -> DefaultSolver<f64> {
        let P = CscMatrix::zeros((2, 2));
        let A = CscMatrix::from(&[
            [1.0, 0.0], //
            [0.0, 1.0],
        ]);
        let c = [1.0, 1.0];
        let b = [1.0, 1.0];
        let cones = [SupportedConeT::NonnegativeConeT(2)];
        DefaultSolver::new(&P, &c, &A, &b, &cones, DefaultSettings::default()).unwrap()
    }

    #[test]
    fn test_update_vectors() {
        let mut solver = test_solver();

        solver.update_b(&[2.0, 3.0]).unwrap();
        assert_eq!(solver.data.b_orig, vec![2.0, 3.0]);

        solver.update_c(&[0.5, -0.5]).unwrap();
        assert_eq!(solver.data.c_orig, vec![0.5, -0.5]);

        // empty input is a no-op
        solver.update_b(&[]).unwrap();
        assert_eq!(solver.data.b_orig, vec![2.0, 3.0]);

        // bad lengths are rejected
        assert!(solver.update_b(&[1.0]).is_err());
        assert!(solver.update_c(&[1.0, 2.0, 3.0]).is_err());
    }
}
