#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[test]
fn test_powcone_feasible() {
    // max z  s.t.  (1, 1, z) in K_pow(0.5), i.e. |z| <= 1
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[
        [0.0], //
        [0.0],
        [-1.0],
    ]);
    let c = [-1.];
    let b = [1., 1., 0.];
    let cones = [PowerConeT(0.5)];

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(f64::abs(solver.solution.x[0] - 1.) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val + 1.) <= 1e-3);
}

#[test]
fn test_powcone_asymmetric_exponent() {
    // (x, 1, 0.5) in K_pow(0.25) requires x^(1/4) >= 0.5, i.e. x >= 1/16
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[
        [-1.0], //
        [0.0],
        [0.0],
    ]);
    let c = [1.];
    let b = [0., 1., 0.5];
    let cones = [PowerConeT(0.25)];

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(f64::abs(solver.solution.x[0] - 0.0625) <= 1e-3);
}

#[test]
fn test_powcone_bad_exponent() {
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[[-1.0], [0.0], [0.0]]);
    let c = [1.];
    let b = [0., 1., 0.5];
    let cones = [PowerConeT(0.0)];

    assert!(DefaultSolver::new(&P, &c, &A, &b, &cones, DefaultSettings::default()).is_err());
}
