use super::{Cone, ConeError};
use crate::algebra::*;
use crate::solver::utils::infbounds::get_infinity;

// -------------------------------------
// Box Cone
// -------------------------------------

// The scaled box {(t,s) : t*l <= s <= t*u, t >= 0}.   Bound entries at
// or beyond the crate infinity threshold are treated as unbounded.

const BOX_NEWTON_ITERS: usize = 100;

pub struct BoxCone<T> {
    l: Vec<T>,
    u: Vec<T>,
    //warm start for the Newton solve on the scaling variable
    t_warm: T,
}

impl<T> BoxCone<T>
where
    T: FloatT,
{
    pub fn new(l: &[T], u: &[T]) -> Result<Self, ConeError> {
        if l.len() != u.len() {
            return Err(ConeError::InvalidBoxBounds);
        }
        if l.iter().zip(u.iter()).any(|(&li, &ui)| li > ui) {
            return Err(ConeError::InvalidBoxBounds);
        }
        Ok(Self {
            l: l.to_vec(),
            u: u.to_vec(),
            t_warm: T::one(),
        })
    }

    //project (t,s) onto the box cone by a semismooth Newton
    //solve on the scaling variable
    fn project(&mut self, z: &mut [T]) {
        let infcap: T = get_infinity().as_T();
        let t0 = z[0];
        let s0 = &z[1..];

        let mut t = T::max(self.t_warm, T::zero());
        for _ in 0..BOX_NEWTON_ITERS {
            let mut f = t - t0;
            let mut df = T::one();
            for i in 0..self.l.len() {
                let (li, ui, si) = (self.l[i], self.u[i], s0[i]);
                if si < t * li && li > -infcap {
                    f += li * (t * li - si);
                    df += li * li;
                } else if si > t * ui && ui < infcap {
                    f += ui * (t * ui - si);
                    df += ui * ui;
                }
            }
            let dt = f / df;
            t -= dt;
            if T::abs(dt) <= T::epsilon() * T::max(T::one(), T::abs(t)) {
                break;
            }
        }

        if t <= T::zero() {
            z.set(T::zero());
            self.t_warm = T::one();
            return;
        }
        self.t_warm = t;

        z[0] = t;
        for i in 0..self.l.len() {
            let (li, ui) = (self.l[i], self.u[i]);
            if li > -infcap {
                z[i + 1] = T::max(z[i + 1], t * li);
            }
            if ui < infcap {
                z[i + 1] = T::min(z[i + 1], t * ui);
            }
        }
    }
}

impl<T> Cone<T> for BoxCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.l.len() + 1
    }

    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool {
        //the scaling variable couples all coordinates, so only a
        //uniform scaling preserves membership
        δ.copy_from(e);
        δ.recip();
        δ.scale(e.mean());
        true
    }

    fn project_dual(&mut self, z: &mut [T]) {
        // proj_{K*}(z) = z + proj_K(-z)
        let mut w: Vec<T> = z.iter().map(|&zi| -zi).collect();
        self.project(&mut w);
        for (zi, wi) in z.iter_mut().zip(w.iter()) {
            *zi += *wi;
        }
    }
}
