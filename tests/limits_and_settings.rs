#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

fn test_solver(settings: DefaultSettings<f64>) -> DefaultSolver<f64> {
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::<f64>::identity(2);
    let c = [-1., -1.];
    let b = [1., 1.];
    let cones = [NonnegativeConeT(2)];
    DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap()
}

#[test]
fn test_iteration_limit() {
    let settings = DefaultSettings {
        verbose: false,
        max_iters: 1,
        eps_abs: 1e-12,
        eps_rel: 1e-12,
        reduced_eps_abs: 0.0,
        reduced_eps_rel: 0.0,
        ..DefaultSettings::default()
    };
    let mut solver = test_solver(settings);
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
    assert_eq!(solver.solution.iterations, 1);
}

#[test]
fn test_inaccurate_upgrade_at_iteration_limit() {
    // run long enough to be nearly converged, then stop short.   with
    // loose reduced tolerances the soft stop reports an inaccurate
    // solution instead
    let settings = DefaultSettings {
        verbose: false,
        max_iters: 200,
        eps_abs: 0.0,
        eps_rel: 0.0,
        reduced_eps_abs: 1e-2,
        reduced_eps_rel: 1e-2,
        ..DefaultSettings::default()
    };
    let mut solver = test_solver(settings);
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::SolvedInaccurate);
    assert!(solver.solution.status.is_inaccurate());
}

#[test]
fn test_settings_update() {
    let mut solver = test_solver(DefaultSettings {
        verbose: false,
        ..DefaultSettings::default()
    });

    // mutable parameters can be replaced between solves
    let update = DefaultSettings {
        verbose: false,
        max_iters: 100,
        ..DefaultSettings::default()
    };
    assert!(solver.update_settings(update).is_ok());
    assert_eq!(solver.settings.max_iters, 100);

    // parameters fixed at initialization are rejected
    let update = DefaultSettings {
        verbose: false,
        rho_x: 1e-2,
        ..DefaultSettings::default()
    };
    assert!(solver.update_settings(update).is_err());
}

#[test]
fn test_time_limit() {
    let settings = DefaultSettings {
        verbose: false,
        time_limit: 1e-9,
        eps_abs: 1e-12,
        eps_rel: 1e-12,
        reduced_eps_abs: 0.0,
        reduced_eps_rel: 0.0,
        ..DefaultSettings::default()
    };
    let mut solver = test_solver(settings);
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::TimeLimit);
}
