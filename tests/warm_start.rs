#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn lp_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<SupportedConeT<f64>>,
) {
    let P = CscMatrix::<f64>::zeros((2, 2));
    let I1 = CscMatrix::<f64>::identity(2);
    let mut I2 = CscMatrix::<f64>::identity(2);
    I2.negate();
    let A = CscMatrix::vcat(&I1, &I2).unwrap();
    let c = vec![1., -1.];
    let b = vec![1., 1., 1., 1.];
    let cones = vec![NonnegativeConeT(2), NonnegativeConeT(2)];
    (P, c, A, b, cones)
}

#[test]
fn test_repeated_solves_agree() {
    let (P, c, A, b, cones) = lp_data();

    for warm_start in [false, true] {
        let settings = DefaultSettings {
            verbose: false,
            warm_start,
            eps_abs: 1e-6,
            eps_rel: 1e-6,
            ..DefaultSettings::default()
        };
        let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

        solver.solve();
        assert_eq!(solver.solution.status, SolverStatus::Solved);
        let x1 = solver.solution.x.clone();
        let obj1 = solver.solution.obj_val;

        // identical data, so a second solve lands in the same place
        solver.solve();
        assert_eq!(solver.solution.status, SolverStatus::Solved);
        assert!(solver.solution.x.dist(&x1) <= 1e-6);
        assert!((solver.solution.obj_val - obj1).abs() <= 1e-6);
    }
}

#[test]
fn test_warm_start_resolve() {
    let (P, c, A, b, cones) = lp_data();

    let settings = DefaultSettings {
        verbose: false,
        warm_start: true,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);
    let cold_iters = solver.solution.iterations;

    let refsol = vec![-1., 1.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);

    // nudge the bounds and re-solve from the previous solution
    solver.update_b(&[1.05, 1., 1., 1.]).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x.dist(&refsol) <= 1e-2);
    assert!(solver.solution.iterations <= cold_iters);
}

#[test]
fn test_resolve_after_cost_update() {
    let (P, c, A, b, cones) = lp_data();

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // flip the cost and the solution moves to the opposite vertex
    solver.update_c(&[-1., 1.]).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    let refsol = vec![1., -1.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
}
