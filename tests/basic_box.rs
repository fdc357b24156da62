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
fn test_box_feasible() {
    // min x1 - x2 with -1 <= x1 <= 2 and -1 <= x2 <= 3.
    // slack is (t, x1, x2) with the first row pinning t = 1
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::from(&[
        [0.0, 0.0], //
        [-1.0, 0.0],
        [0.0, -1.0],
    ]);
    let c = [1., -1.];
    let b = [1., 0., 0.];
    let cones = [BoxConeT(vec![-1., -1.], vec![2., 3.])];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![-1., 3.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val + 4.) <= 1e-3);
}

#[test]
fn test_box_one_sided() {
    // upper bound only on x2: entries at the infinity threshold are
    // treated as unbounded
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::from(&[
        [0.0, 0.0], //
        [-1.0, 0.0],
        [0.0, -1.0],
    ]);
    let c = [1., -1.];
    let b = [1., 0., 0.];
    let inf = get_infinity();
    let cones = [BoxConeT(vec![0., -inf], vec![1., 1.])];

    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, test_settings()).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![0., 1.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
}

#[test]
fn test_box_bad_bounds() {
    let P = CscMatrix::<f64>::zeros((1, 1));
    let A = CscMatrix::from(&[[0.0], [-1.0]]);
    let c = [1.];
    let b = [1., 0.];
    let cones = [BoxConeT(vec![2.], vec![1.])]; // l > u

    assert!(DefaultSolver::new(&P, &c, &A, &b, &cones, DefaultSettings::default()).is_err());
}
