use super::{Cone, exppow_common::*};
use crate::algebra::*;

// -------------------------------------
// Power Cone
// -------------------------------------

// A positive exponent declares the primal cone
// {(x,y,z) : x,y >= 0, x^a y^(1-a) >= |z|}.   A negative exponent
// declares its dual, parameterized by |a|.

pub struct PowerCone<T> {
    α: T,
}

impl<T> PowerCone<T>
where
    T: FloatT,
{
    pub fn new(α: T) -> Self {
        Self { α }
    }
}

impl<T> Cone<T> for PowerCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        3
    }

    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool {
        δ.copy_from(e);
        δ.recip();
        δ.scale(e.mean());
        true
    }

    fn project_dual(&mut self, z: &mut [T]) {
        if self.α > T::zero() {
            // proj_{K*}(z) = z + proj_K(-z)
            let mut w = [-z[0], -z[1], -z[2]];
            project_pow_cone(&mut w, self.α);
            z[0] += w[0];
            z[1] += w[1];
            z[2] += w[2];
        } else {
            //declared cone is the dual, so project onto the primal
            project_pow_cone(z, -self.α);
        }
    }
}
