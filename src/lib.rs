//!  __splitcone__ is a Rust implementation of an operator splitting
//!  numerical solver for convex conic optimization problems using a
//!  homogeneous self-dual embedding.  splitcone solves the following
//!  problem:
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax + s = b \\\\\[1ex\]
//!         & s \in \mathcal{K}
//!  \end{array}
//! $$
//!
//! with decision variables
//! $x \in \mathbb{R}^n$,
//! $s \in \mathbb{R}^m$
//! and data
//! $P=P^\top \succeq 0$,
//! $c \in \mathbb{R}^n$,
//! $A \in \mathbb{R}^{m \times n}$, and
//! $b \in \mathbb{R}^m$.
//! The convex set $\mathcal{K}$ is a composition of convex cones:
//! zero, nonnegative, box, second-order, positive semidefinite,
//! exponential and power cones.
//!
//! ## Features
//!
//! * __First order__: the solver alternates a single factorize-once linear
//!   system solve with projections onto the cones, so each iteration is
//!   cheap and memory use is fixed after setup.
//!
//! * __Infeasibility detection__: infeasible and unbounded problems are
//!   detected through the homogeneous embedding and reported with
//!   certificates.
//!
//! * __Warm starting and data updating__: an initialized solver can be
//!   re-run with updated `b` and `c` vectors, warm started from the
//!   previous solution, without refactorization.

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub(crate) mod io;
pub mod solver;
pub mod timers;
