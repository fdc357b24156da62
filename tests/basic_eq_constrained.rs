#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

fn test_settings() -> DefaultSettings<f64> {
    DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    }
}

#[test]
fn test_eq_constrained_qp() {
    // min 0.5||x||^2  s.t.  x1 + x2 + x3 = 3
    let P = CscMatrix::identity(3);
    let c = [0., 0., 0.];
    let A = CscMatrix::from(&[[1.0, 1.0, 1.0]]);
    let b = [3.];
    let cones = [ZeroConeT(1)];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![1., 1., 1.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val - 1.5) <= 1e-3);
}

#[test]
fn test_mixed_eq_and_inequality() {
    // min x1 + 2 x2  s.t.  x1 + x2 = 1, x >= 0
    let P = CscMatrix::<f64>::zeros((2, 2));
    let c = [1., 2.];
    let eq = CscMatrix::from(&[[1.0, 1.0]]);
    let mut I = CscMatrix::<f64>::identity(2);
    I.negate();
    let A = CscMatrix::vcat(&eq, &I).unwrap();
    let b = [1., 0., 0.];
    let cones = [ZeroConeT(1), NonnegativeConeT(2)];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![1., 0.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val - 1.) <= 1e-3);
}
