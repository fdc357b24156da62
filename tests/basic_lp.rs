#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn basic_lp_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<SupportedConeT<f64>>,
) {
    let P = CscMatrix::<f64>::zeros((3, 3));

    let I1 = CscMatrix::<f64>::identity(3);
    let mut I2 = CscMatrix::<f64>::identity(3);
    I2.negate();
    let A = CscMatrix::vcat(&I1, &I2).unwrap();

    let c = vec![2., -1., 0.5];
    let b = vec![1.; 6];

    let cones = vec![NonnegativeConeT(3), NonnegativeConeT(3)];

    (P, c, A, b, cones)
}

fn test_settings() -> DefaultSettings<f64> {
    DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    }
}

#[test]
fn test_lp_feasible() {
    let (P, c, A, b, cones) = basic_lp_data();

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![-1., 1., -1.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);

    let refobj = -3.5;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val_dual - refobj) <= 1e-3);
}

#[test]
fn test_lp_row_scaling_invariance() {
    let (P, c, A, b, cones) = basic_lp_data();

    // the same feasible set with wildly rescaled rows
    let mut A2 = A.clone();
    let mut b2 = b.clone();
    let rowscale = [1e-4, 1e3, 1., 1e4, 1e-3, 1.];
    A2.lscale(&rowscale);
    b2.hadamard(&rowscale);

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();
    let mut solver2 = DefaultSolver::new(&P, &c, &A2, &b2, &cones, test_settings()).unwrap();

    solver.solve();
    solver2.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert_eq!(solver2.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&solver2.solution.x) <= 1e-3);
}

#[test]
fn test_lp_dimension_mismatch() {
    let (P, c, A, b, _) = basic_lp_data();

    // cone dimensions must sum to the row count of A
    let cones = vec![NonnegativeConeT(3), NonnegativeConeT(4)];
    assert!(DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).is_err());

    // short b is likewise rejected
    let cones = vec![NonnegativeConeT(3), NonnegativeConeT(3)];
    assert!(DefaultSolver::new(&P, &c, &A, &b[..5], &cones, test_settings()).is_err());
}

#[test]
fn test_lp_primal_infeasible() {
    let (P, c, A, mut b, cones) = basic_lp_data();

    // x1 <= 1 and -x1 <= -2 together are inconsistent
    b[3] = -2.;

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Infeasible);
    assert!(solver.solution.obj_val.is_nan());
    assert!(solver.solution.obj_val_dual.is_nan());

    // certificate is normalized so that b'y = -1
    let bty = b.dot(&solver.solution.y);
    assert!(f64::abs(bty + 1.) <= 1e-6);
}

#[test]
fn test_lp_unbounded() {
    // only upper bounds, and a cost that decreases without limit
    let P = CscMatrix::<f64>::zeros((3, 3));
    let A = CscMatrix::<f64>::identity(3);
    let c = vec![0., 0., -1.];
    let b = vec![1.; 3];
    let cones = vec![NonnegativeConeT(3)];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Unbounded);
    assert!(solver.solution.obj_val.is_nan());
    assert!(solver.solution.obj_val_dual.is_nan());

    // certificate ray is normalized so that c'x = -1
    let ctx = c.dot(&solver.solution.x);
    assert!(f64::abs(ctx + 1.) <= 1e-6);
}
