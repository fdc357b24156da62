use super::{Cone, exppow_common::*};
use crate::algebra::*;
use std::marker::PhantomData;

// -------------------------------------
// Exponential Cone
// -------------------------------------

pub struct ExponentialCone<T> {
    phantom: PhantomData<T>,
}

impl<T> ExponentialCone<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T: FloatT> Default for ExponentialCone<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cone<T> for ExponentialCone<T>
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
        // proj_{K*}(z) = z + proj_K(-z)
        let mut w = [-z[0], -z[1], -z[2]];
        project_exp_cone(&mut w);
        z[0] += w[0];
        z[1] += w[1];
        z[2] += w[2];
    }
}

// -------------------------------------
// Dual Exponential Cone
// -------------------------------------

pub struct DualExponentialCone<T> {
    phantom: PhantomData<T>,
}

impl<T> DualExponentialCone<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T: FloatT> Default for DualExponentialCone<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cone<T> for DualExponentialCone<T>
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
        //dual of the dual cone is the primal cone
        project_exp_cone(z);
    }
}
