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
fn test_socp_feasible() {
    // min -x1 - x2  s.t.  ||(x1,x2)|| <= 1
    // slack s = (1, x1, x2) lies in the second order cone
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::from(&[
        [0.0, 0.0], //
        [-1.0, 0.0],
        [0.0, -1.0],
    ]);
    let c = [-1., -1.];
    let b = [1., 0., 0.];
    let cones = [SecondOrderConeT(3)];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let r = f64::sqrt(0.5);
    let refsol = vec![r, r];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);

    let refobj = -f64::sqrt(2.);
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-3);
}

#[test]
fn test_socp_infeasible() {
    // ||(x1,x2)|| <= -1 is empty
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::from(&[
        [0.0, 0.0], //
        [-1.0, 0.0],
        [0.0, -1.0],
    ]);
    let c = [-1., -1.];
    let b = [-1., 0., 0.];
    let cones = [SecondOrderConeT(3)];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Infeasible);
}
