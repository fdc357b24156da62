//! Type-II Anderson acceleration for the solver's fixed point sequence.
//!
//! The accelerator records successive input/output pairs of the fixed
//! point map and periodically proposes an extrapolated candidate.  A
//! deferred safeguard in the engine restores the recorded fallback
//! iterate if the candidate worsened the map residual.

use super::traits::Accelerator;
use crate::algebra::*;
use std::collections::VecDeque;

pub struct AndersonAccelerator<T> {
    dim: usize,
    lookback: usize,
    regularization: T,

    // map difference history, oldest first
    dg_hist: VecDeque<Vec<T>>,
    df_hist: VecDeque<Vec<T>>,

    // last recorded map pair
    x_prev: Vec<T>,
    g_prev: Vec<T>,
    have_prev: bool,

    // most recent extrapolant and the iterate it replaced
    candidate: Vec<T>,
    fallback: Vec<T>,
    staged_norm: Option<T>,
    rejections: u32,

    // factorization workspace
    fk: Vec<T>,
    gram: Vec<T>,
    gamma: Vec<T>,
}

impl<T: FloatT> AndersonAccelerator<T> {
    pub fn new(dim: usize, lookback: usize, regularization: T) -> Self {
        Self {
            dim,
            lookback,
            regularization,
            dg_hist: VecDeque::with_capacity(lookback),
            df_hist: VecDeque::with_capacity(lookback),
            x_prev: vec![T::zero(); dim],
            g_prev: vec![T::zero(); dim],
            have_prev: false,
            candidate: vec![T::zero(); dim],
            fallback: vec![T::zero(); dim],
            staged_norm: None,
            rejections: 0,
            fk: vec![T::zero(); dim],
            gram: vec![T::zero(); lookback * lookback],
            gamma: vec![T::zero(); lookback],
        }
    }

    fn clear_history(&mut self) {
        self.dg_hist.clear();
        self.df_hist.clear();
        self.have_prev = false;
    }
}

impl<T: FloatT> Accelerator<T> for AndersonAccelerator<T> {
    fn reset(&mut self) {
        self.clear_history();
        self.staged_norm = None;
        self.rejections = 0;
    }

    fn update(&mut self, x: &[T], fx: &[T]) {
        debug_assert_eq!(x.len(), self.dim);
        debug_assert_eq!(fx.len(), self.dim);

        if self.have_prev {
            if self.dg_hist.len() == self.lookback {
                self.dg_hist.pop_front();
                self.df_hist.pop_front();
            }
            let mut dg = vec![T::zero(); self.dim];
            let mut df = vec![T::zero(); self.dim];
            for i in 0..self.dim {
                let dxi = x[i] - self.x_prev[i];
                dg[i] = fx[i] - self.g_prev[i];
                df[i] = dg[i] - dxi;
            }
            self.dg_hist.push_back(dg);
            self.df_hist.push_back(df);
        }
        self.x_prev.copy_from(x);
        self.g_prev.copy_from(fx);
        self.have_prev = true;
    }

    fn accelerate(&mut self) -> Option<&[T]> {
        let m = self.df_hist.len();
        if m == 0 || !self.have_prev {
            return None;
        }

        // residual of the last recorded pair
        for i in 0..self.dim {
            self.fk[i] = self.g_prev[i] - self.x_prev[i];
        }

        // regularized normal equations (dF'dF + reg*I) gamma = dF'fk
        let gram = &mut self.gram[..m * m];
        for k in 0..m {
            for j in 0..=k {
                let g = self.df_hist[j].dot(&self.df_hist[k]);
                gram[j + k * m] = g;
                gram[k + j * m] = g;
            }
            gram[k + k * m] += self.regularization;
            self.gamma[k] = self.df_hist[k].dot(&self.fk);
        }

        if crate::algebra::dense::cholesky_factor(gram, m).is_err() {
            self.clear_history();
            return None;
        }
        crate::algebra::dense::cholesky_solve(gram, m, &mut self.gamma[..m]);

        // candidate = g_k - sum_j gamma_j * dg_j
        self.candidate.copy_from(&self.g_prev);
        for (j, dg) in self.dg_hist.iter().enumerate() {
            let gj = self.gamma[j];
            for i in 0..self.dim {
                self.candidate[i] -= gj * dg[i];
            }
        }

        if !self.candidate.is_finite() {
            self.clear_history();
            return None;
        }
        Some(&self.candidate)
    }

    fn candidate(&self) -> &[T] {
        &self.candidate
    }

    fn stage(&mut self, f_norm: T) {
        self.fallback.copy_from(&self.g_prev);
        self.staged_norm = Some(f_norm);
    }

    fn staged_norm(&self) -> Option<T> {
        self.staged_norm
    }

    fn fallback(&self) -> &[T] {
        &self.fallback
    }

    fn reject(&mut self) {
        self.staged_norm = None;
        self.rejections += 1;
        self.clear_history();
    }

    fn accept(&mut self) {
        self.staged_norm = None;
    }

    fn rejections(&self) -> u32 {
        self.rejections
    }
}
