use super::Cone;
use crate::algebra::*;
use std::marker::PhantomData;

// -------------------------------------
// Second Order Cone
// -------------------------------------

pub struct SecondOrderCone<T> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> SecondOrderCone<T>
where
    T: FloatT,
{
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for SecondOrderCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.dim
    }

    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool {
        //the cone is only invariant to uniform scaling, so replace
        //the elementwise scaling by its mean over the block
        δ.copy_from(e);
        δ.recip();
        δ.scale(e.mean());
        true
    }

    fn project_dual(&mut self, z: &mut [T]) {
        //self dual.   closed form projection onto {(t,x) : ||x|| <= t}
        if z.is_empty() {
            return;
        }
        let t = z[0];
        let xnorm = z[1..].norm();

        if xnorm <= t {
            //inside the cone
        } else if xnorm <= -t {
            //inside the polar cone
            z.set(T::zero());
        } else {
            let half: T = (0.5).as_T();
            let s = half * (t + xnorm);
            z[0] = s;
            z[1..].scale(s / xnorm);
        }
    }
}
