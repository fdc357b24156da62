#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[test]
fn test_expcone_feasible() {
    // min z  s.t.  (1, 1, z) in K_exp, i.e. z >= e
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[
        [0.0], //
        [0.0],
        [-1.0],
    ]);
    let c = [1.];
    let b = [1., 1., 0.];
    let cones = [ExponentialConeT()];

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(f64::abs(solver.solution.x[0] - std::f64::consts::E) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val - std::f64::consts::E) <= 1e-3);
}

#[test]
fn test_expcone_duality_gap() {
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[
        [0.0], //
        [0.0],
        [-1.0],
    ]);
    let c = [1.];
    let b = [1., 1., 0.];
    let cones = [ExponentialConeT()];

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(f64::abs(solver.solution.obj_val - solver.solution.obj_val_dual) <= 1e-3);
}
