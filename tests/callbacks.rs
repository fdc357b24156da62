#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn test_solver() -> DefaultSolver<f64> {
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::<f64>::identity(2);
    let c = [-1., -1.];
    let b = [1., 1.];
    let cones = [NonnegativeConeT(2)];
    let settings = DefaultSettings {
        verbose: false,
        ..DefaultSettings::default()
    };
    DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap()
}

#[test]
fn test_termination_callback_stops_solver() {
    let mut solver = test_solver();

    solver.set_termination_callback(|_info| true);
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Interrupted);
}

#[test]
fn test_termination_callback_counts_iterations() {
    let mut solver = test_solver();

    let calls = Arc::new(AtomicU32::new(0));
    let calls_cb = Arc::clone(&calls);

    solver.set_termination_callback(move |_info| {
        calls_cb.fetch_add(1, Ordering::Relaxed) >= 4
    });
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Interrupted);
    assert_eq!(calls.load(Ordering::Relaxed), 5);
    assert_eq!(solver.solution.iterations, 5);
}

#[test]
fn test_interrupt_is_not_upgraded() {
    // a stop request on an already-converged iterate still reports
    // Interrupted, never an inaccurate solution
    let P = CscMatrix::<f64>::zeros((2, 2));
    let A = CscMatrix::<f64>::identity(2);
    let c = [-1., -1.];
    let b = [1., 1.];
    let cones = [NonnegativeConeT(2)];
    let settings = DefaultSettings {
        verbose: false,
        warm_start: true,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();
    assert_eq!(solver.solution.status, SolverStatus::Solved);

    solver.set_termination_callback(|_info| true);
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Interrupted);
}

#[test]
fn test_unset_termination_callback() {
    let mut solver = test_solver();

    solver.set_termination_callback(|_info| true);
    solver.unset_termination_callback();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
}
