use super::*;
use crate::algebra::*;
use std::collections::HashMap;
use std::iter::zip;
use std::ops::Range;

// -------------------------------------
// default composite cone type
// -------------------------------------

pub struct CompositeCone<T: FloatT = f64> {
    cones: Vec<SupportedCone<T>>,

    //Type count for each cone type
    pub(crate) type_counts: HashMap<SupportedConeTag, usize>,

    //overall size of the composite cone
    pub(crate) numel: usize,

    //ranges for the indices of the constituent cones
    pub(crate) rng_cones: Vec<Range<usize>>,
}

impl<T> CompositeCone<T>
where
    T: FloatT,
{
    pub fn new(types: &[SupportedConeT<T>]) -> Result<Self, ConeError> {
        let ncones = types.len();
        let mut cones: Vec<SupportedCone<T>> = Vec::with_capacity(ncones);

        // Count for the number of each cone type, indexed by SupportedConeTag
        let mut type_counts = HashMap::new();

        // create cones with the given dims, validating their parameters
        for t in types.iter() {
            let cone = make_cone(t)?;
            *type_counts.entry(cone.as_tag()).or_insert(0) += 1;
            cones.push(cone);
        }

        let numel = cones.iter().map(|c| c.numel()).sum();
        let rng_cones = _make_rng_cones(&cones);

        Ok(Self {
            cones,
            type_counts,
            numel,
            rng_cones,
        })
    }
}

fn _make_rng_cones<T>(cones: &[SupportedCone<T>]) -> Vec<Range<usize>>
where
    T: FloatT,
{
    let mut rngs = Vec::with_capacity(cones.len());

    if !cones.is_empty() {
        let mut start = 0;
        for cone in cones {
            let stop = start + cone.numel();
            rngs.push(start..stop);
            start = stop;
        }
    }
    rngs
}

impl<T> CompositeCone<T>
where
    T: FloatT,
{
    pub fn len(&self) -> usize {
        self.cones.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, SupportedCone<T>> {
        self.cones.iter()
    }
    pub(crate) fn get_type_count(&self, tag: SupportedConeTag) -> usize {
        if self.type_counts.contains_key(&tag) {
            self.type_counts[&tag]
        } else {
            0
        }
    }

    // per-row weights of the embedding metric on the y block, before
    // division by the overall scale.   Equality rows take a smaller
    // weight so that they are enforced more tightly.
    pub(crate) fn rho_y_base(&self, rho_zero_ratio: T) -> Vec<T> {
        let mut base = vec![T::one(); self.numel];
        for (cone, rng) in zip(&self.cones, &self.rng_cones) {
            if cone.as_tag() == SupportedConeTag::ZeroCone {
                base[rng.clone()].set(rho_zero_ratio);
            }
        }
        base
    }
}

impl<T> Cone<T> for CompositeCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.numel
    }

    fn rectify_equilibration(&self, δ: &mut [T], e: &[T]) -> bool {
        let mut any_changed = false;

        // we will update e <- δ .* e using return values
        // from this function.  default is to do nothing at all
        δ.set(T::one());
        for (cone, rng) in zip(&self.cones, &self.rng_cones) {
            let δi = &mut δ[rng.clone()];
            let ei = &e[rng.clone()];
            any_changed |= cone.rectify_equilibration(δi, ei);
        }
        any_changed
    }

    fn project_dual(&mut self, z: &mut [T]) {
        for (cone, rng) in zip(&mut self.cones, &self.rng_cones) {
            cone.project_dual(&mut z[rng.clone()]);
        }
    }
}
