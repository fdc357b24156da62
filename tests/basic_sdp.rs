#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[test]
fn test_sdp_feasible() {
    // min <C,X>  s.t.  tr(X) = 1, X psd, with C = [2 1; 1 2].
    // the optimum is the unit eigenvector for the smallest eigenvalue,
    // X = [0.5 -0.5; -0.5 0.5] with objective 1.
    //
    // the variable is x = svec(X), with the off diagonal scaled
    // by sqrt(2)
    let rt2 = f64::sqrt(2.);

    let P = CscMatrix::<f64>::zeros((3, 3));

    // first row: trace equality.  remaining rows: s = x in the psd cone
    let mut I = CscMatrix::<f64>::identity(3);
    I.negate();
    let tr = CscMatrix::from(&[[1.0, 0.0, 1.0]]);
    let A = CscMatrix::vcat(&tr, &I).unwrap();

    let c = [2., rt2, 2.];
    let b = [1., 0., 0., 0.];
    let cones = [ZeroConeT(1), PSDTriangleConeT(2)];

    let settings = DefaultSettings {
        verbose: false,
        eps_abs: 1e-6,
        eps_rel: 1e-6,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    let refsol = vec![0.5, -0.5 * rt2, 0.5];
    assert!(solver.solution.x.dist(&refsol) <= 1e-3);
    assert!(f64::abs(solver.solution.obj_val - 1.) <= 1e-3);
}

#[test]
fn test_sdp_infeasible() {
    // tr(X) = -1 is impossible for X psd
    let P = CscMatrix::<f64>::zeros((3, 3));
    let mut I = CscMatrix::<f64>::identity(3);
    I.negate();
    let tr = CscMatrix::from(&[[1.0, 0.0, 1.0]]);
    let A = CscMatrix::vcat(&tr, &I).unwrap();

    let c = [1., 0., 1.];
    let b = [-1., 0., 0., 0.];
    let cones = [ZeroConeT(1), PSDTriangleConeT(2)];

    let settings = DefaultSettings {
        verbose: false,
        ..DefaultSettings::default()
    };
    let mut solver = DefaultSolver::new(&P, &c, &A, &b, &cones, settings).unwrap();

    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Infeasible);
}
