#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::{
    cones::{CompositeCone, Cone},
    traits::ProblemData,
};
use crate::solver::utils::infbounds::get_infinity;

// ---------------
// Data type for default problem format
// ---------------

/// Standard-form solver type implementing the [`ProblemData`](crate::solver::core::traits::ProblemData) trait

pub struct DefaultProblemData<T> {
    /// quadratic cost term, normalized, upper triangle only
    pub P: CscMatrix<T>,
    /// linear cost term, normalized
    pub c: Vec<T>,
    /// constraint matrix, normalized
    pub A: CscMatrix<T>,
    /// constraint vector, normalized
    pub b: Vec<T>,
    pub n: usize,
    pub m: usize,
    pub equilibration: DefaultEquilibration<T>,

    // original data vectors, retained so that parametric updates
    // between solves can be renormalized consistently
    pub(crate) c_orig: Vec<T>,
    pub(crate) b_orig: Vec<T>,

    // norms of the original data, used in termination checks
    pub(crate) norm_b_orig: T,
    pub(crate) norm_c_orig: T,
}

impl<T> DefaultProblemData<T>
where
    T: FloatT,
{
    pub fn new(P: &CscMatrix<T>, c: &[T], A: &CscMatrix<T>, b: &[T]) -> Self {
        // dimension checks will have already been
        // performed during problem setup, so skip here

        let P = P.to_triu();
        let (m, n) = (A.m, A.n);

        // cap entries in b at the infinity threshold, so that
        // unbounded box rows cannot poison the scaling
        let infbound: T = get_infinity().as_T();
        let mut b_orig = b.to_vec();
        b_orig.scalarop(|x| T::min(x, infbound));

        let equilibration = DefaultEquilibration::<T>::new(n, m);

        Self {
            P,
            c: c.to_vec(),
            A: A.clone(),
            b: b_orig.clone(),
            n,
            m,
            equilibration,
            c_orig: c.to_vec(),
            b_orig,
            norm_b_orig: T::zero(),
            norm_c_orig: T::zero(),
        }
    }
}

impl<T> ProblemData<T> for DefaultProblemData<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type C = CompositeCone<T>;
    type SE = DefaultSettings<T>;

    fn equilibrate(&mut self, cones: &CompositeCone<T>, settings: &DefaultSettings<T>) {
        let data = self;
        let equil = &mut data.equilibration;

        // if equilibration is disabled the default structure already
        // holds identity scaling, and only the vector normalization
        // below applies
        if settings.normalize {
            // references to scaling matrices from workspace
            let (d, e) = (&mut equil.d, &mut equil.e);

            // use the inverse scalings as work vectors
            let dwork = &mut equil.dinv;
            let ework = &mut equil.einv;

            let (P, A) = (&mut data.P, &mut data.A);

            let scale_min = settings.equilibrate_min_scaling;
            let scale_max = settings.equilibrate_max_scaling;

            // perform scaling operations for a fixed number of steps
            for _ in 0..settings.equilibrate_max_iter {
                dwork.set(T::zero());
                ework.set(T::zero());
                kkt_col_norms(P, A, dwork, ework);

                dwork.scalarop(|x| limit_scaling(x, scale_min, scale_max));
                ework.scalarop(|x| limit_scaling(x, scale_min, scale_max));

                dwork.rsqrt();
                ework.rsqrt();

                // Scale the problem data and update the
                // equilibration matrices
                P.lrscale(dwork, dwork);
                A.lrscale(ework, dwork);
                d.hadamard(dwork);
                e.hadamard(ework);
            }

            // fix scalings in cones for which elementwise
            // scaling can't be applied
            if cones.rectify_equilibration(ework, e) {
                A.lscale(ework);
                e.hadamard(ework);
            }

            // update the inverse scaling data
            equil.dinv.scalarop_from(T::recip, &equil.d);
            equil.einv.scalarop_from(T::recip, &equil.e);
        }

        // the overall primal and dual scalings normalize the
        // equilibrated b and c.   These are computed once here and
        // held fixed across solves so that the quadratic cost block
        // never requires refactorization
        let min_scale: T = MIN_SCALE.as_T();
        let mut work = data.b_orig.clone();
        work.hadamard(&equil.e);
        equil.primal_scale = T::recip(T::max(work.norm(), min_scale));

        let mut work = data.c_orig.clone();
        work.hadamard(&equil.d);
        equil.dual_scale = T::recip(T::max(work.norm(), min_scale));

        data.P.scale(equil.dual_scale / equil.primal_scale);

        data.renormalize_vectors();
    }

    fn renormalize_vectors(&mut self) {
        let equil = &self.equilibration;

        self.b.copy_from(&self.b_orig);
        self.b.hadamard(&equil.e);
        self.b.scale(equil.primal_scale);

        self.c.copy_from(&self.c_orig);
        self.c.hadamard(&equil.d);
        self.c.scale(equil.dual_scale);

        self.norm_b_orig = self.b_orig.norm();
        self.norm_c_orig = self.c_orig.norm();
    }
}

// ---------------
// utilities
// ---------------

fn kkt_col_norms<T: FloatT>(
    P: &CscMatrix<T>,
    A: &CscMatrix<T>,
    norm_LHS: &mut [T],
    norm_RHS: &mut [T],
) {
    P.col_norms_sym_no_reset(norm_LHS); // P can be triu
    A.col_norms_no_reset(norm_LHS); // incrementally from P norms
    A.row_norms_no_reset(norm_RHS); // same as column norms of A'
}

fn limit_scaling<T>(s: T, minval: T, maxval: T) -> T
where
    T: FloatT + ScalarMath<T = T>,
{
    s.clip(minval, maxval, T::one(), maxval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SupportedConeT;

    fn test_data() -> DefaultProblemData<f64> {
        let P = CscMatrix::zeros((2, 2));
        let A = CscMatrix::from(&[
            [100.0, 0.0], //
            [0.0, 0.01],
            [1.0, 1.0],
        ]);
        let c = [1.0, 100.0];
        let b = [1.0, 1.0, 4.0];
        DefaultProblemData::new(&P, &c, &A, &b)
    }

    #[test]
    fn test_equilibration_bounds_entries() {
        let mut data = test_data();
        let cones = CompositeCone::new(&[SupportedConeT::NonnegativeConeT(3)]).unwrap();
        let settings = DefaultSettings::default();
        data.equilibrate(&cones, &settings);

        // all scaled entries should be within a modest range
        for &v in data.A.nzval.iter() {
            assert!(v.abs() <= 10.0);
            assert!(v.abs() >= 0.01);
        }
        // normalized b should have roughly unit norm
        assert!((data.b.norm() - 1.0).abs() < 1e-12);
        assert!((data.c.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_renormalize_after_update() {
        let mut data = test_data();
        let cones = CompositeCone::new(&[SupportedConeT::NonnegativeConeT(3)]).unwrap();
        let settings = DefaultSettings::default();
        data.equilibrate(&cones, &settings);

        let scale_before = data.equilibration.primal_scale;

        // doubling b doubles the normalized vector, with the
        // scalings themselves held fixed
        let b_norm_before = data.b.norm();
        data.b_orig.scale(2.0);
        data.renormalize_vectors();

        assert_eq!(scale_before, data.equilibration.primal_scale);
        assert!((data.b.norm() - 2.0 * b_norm_before).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_disabled() {
        let mut data = test_data();
        let cones = CompositeCone::new(&[SupportedConeT::NonnegativeConeT(3)]).unwrap();
        let settings = DefaultSettings {
            normalize: false,
            ..DefaultSettings::default()
        };
        data.equilibrate(&cones, &settings);

        assert!(data.equilibration.d.iter().all(|&x| x == 1.0));
        // primal/dual scales are still applied to b and c
        assert!((data.b.norm() - 1.0).abs() < 1e-12);
    }
}
