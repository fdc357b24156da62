// Shared projection kernels for the exponential and power cone
// families.   Both cones are projected in their primal form, with the
// dual handled through the Moreau identity
//
//     proj_{K*}(z) = z + proj_K(-z)

use crate::algebra::*;

// scan window for the exponential cone KKT root search
const EXP_SCAN_LO: f64 = -30.0;
const EXP_SCAN_HI: f64 = 30.0;
const EXP_SCAN_STEPS: usize = 600;
const BISECTION_ITERS: usize = 100;

fn membership_tol<T: FloatT>() -> T {
    T::epsilon().sqrt()
}

// true if v is in the closure of Kexp = {(x,y,z) : y > 0, y*e^(x/y) <= z}
pub(crate) fn in_exp_cone<T: FloatT>(v: &[T]) -> bool {
    let tol = membership_tol::<T>();
    (v[1] > T::zero() && v[1] * T::exp(v[0] / v[1]) - v[2] <= tol)
        || (v[0] <= T::zero() && T::abs(v[1]) <= tol && v[2] >= -tol)
}

// true if v is in the polar of Kexp, i.e. -v is in the dual cone
pub(crate) fn in_exp_cone_polar<T: FloatT>(v: &[T]) -> bool {
    let tol = membership_tol::<T>();
    let e = T::exp(T::one());
    (v[0] > T::zero() && v[0] * T::exp(v[1] / v[0]) + e * v[2] <= tol)
        || (T::abs(v[0]) <= tol && v[1] <= tol && v[2] <= tol)
}

// KKT residual for a boundary projection parameterized by
// alpha = p_x/p_y.   A root of h with mu > 0 and p_y > 0 gives a
// candidate projection
//
//     p = (v_x - mu*E, v_y - mu*E*(1-alpha), v_z + mu),   E = e^alpha
fn exp_kkt_residual<T: FloatT>(α: T, v: &[T]) -> (T, T) {
    let e = T::exp(α);
    let μ = (v[0] - α * v[1]) / (e * (T::one() - α + α * α));
    let h = v[1] * e - μ * (T::one() + e * e * (T::one() - α)) - v[2];
    (h, μ)
}

fn exp_candidate<T: FloatT>(α: T, μ: T, v: &[T]) -> [T; 3] {
    let e = T::exp(α);
    [v[0] - μ * e, v[1] - μ * e * (T::one() - α), v[2] + μ]
}

fn dist3<T: FloatT>(a: &[T; 3], v: &[T]) -> T {
    let d0 = a[0] - v[0];
    let d1 = a[1] - v[1];
    let d2 = a[2] - v[2];
    T::sqrt(d0 * d0 + d1 * d1 + d2 * d2)
}

/// Project `z` onto the exponential cone in place.
pub(crate) fn project_exp_cone<T: FloatT>(z: &mut [T]) {
    let v = [z[0], z[1], z[2]];

    if in_exp_cone(&v) {
        return;
    }
    if in_exp_cone_polar(&v) {
        z.set(T::zero());
        return;
    }
    if v[0] <= T::zero() && v[1] <= T::zero() {
        z[1] = T::zero();
        z[2] = T::max(v[2], T::zero());
        return;
    }

    // boundary projection.   scan for sign changes of the KKT residual
    // and refine each bracket by bisection, keeping the closest valid
    // candidate.   the vertex of the cone is always admissible.
    let mut best = [T::min(v[0], T::zero()), T::zero(), T::max(v[2], T::zero())];
    let mut best_dist = dist3(&best, &v);

    let lo: T = EXP_SCAN_LO.as_T();
    let hi: T = EXP_SCAN_HI.as_T();
    let step = (hi - lo) / (EXP_SCAN_STEPS).as_T();

    let mut α_prev = lo;
    let (mut h_prev, _) = exp_kkt_residual(α_prev, &v);

    for k in 1..=EXP_SCAN_STEPS {
        let α = lo + step * (k).as_T();
        let (h, _) = exp_kkt_residual(α, &v);

        if h_prev * h < T::zero() {
            // bracketed root
            let (mut a, mut b) = (α_prev, α);
            let mut ha = h_prev;
            for _ in 0..BISECTION_ITERS {
                let mid = (a + b) / (2.0).as_T();
                let (hm, _) = exp_kkt_residual(mid, &v);
                if ha * hm <= T::zero() {
                    b = mid;
                } else {
                    a = mid;
                    ha = hm;
                }
            }
            let root = (a + b) / (2.0).as_T();
            let (_, μ) = exp_kkt_residual(root, &v);
            let p = exp_candidate(root, μ, &v);
            if μ > T::zero() && p[1] > T::zero() {
                let d = dist3(&p, &v);
                if d < best_dist {
                    best_dist = d;
                    best = p;
                }
            }
        }
        α_prev = α;
        h_prev = h;
    }

    z.copy_from(&best);
}

// true if v is in the power cone {(x,y,z) : x,y >= 0, x^a y^(1-a) >= |z|}
pub(crate) fn in_pow_cone<T: FloatT>(v: &[T], a: T) -> bool {
    let tol = membership_tol::<T>();
    v[0] >= T::zero()
        && v[1] >= T::zero()
        && T::powf(v[0], a) * T::powf(v[1], T::one() - a) - T::abs(v[2]) >= -tol
}

// true if v is in the polar of the power cone
pub(crate) fn in_pow_cone_polar<T: FloatT>(v: &[T], a: T) -> bool {
    let tol = membership_tol::<T>();
    let scale = T::powf(a, a) * T::powf(T::one() - a, T::one() - a);
    v[0] <= T::zero()
        && v[1] <= T::zero()
        && T::powf(-v[0], a) * T::powf(-v[1], T::one() - a) - scale * T::abs(v[2]) >= -tol
}

/// Project `z` onto the power cone with exponent `a` in place.
pub(crate) fn project_pow_cone<T: FloatT>(z: &mut [T], a: T) {
    let v = [z[0], z[1], z[2]];

    if in_pow_cone(&v, a) {
        return;
    }
    if in_pow_cone_polar(&v, a) {
        z.set(T::zero());
        return;
    }

    let rh = T::abs(v[2]);
    if rh == T::zero() {
        z[0] = T::max(v[0], T::zero());
        z[1] = T::max(v[1], T::zero());
        return;
    }

    // bisection on r = |p_z| in (0, |v_z|).   for fixed r the optimal
    // first two coordinates have a closed form, and the boundary
    // condition x^a y^(1-a) = r is monotone in r.
    let half: T = (0.5).as_T();
    let four: T = (4.0).as_T();
    let xcoord = |r: T| half * (v[0] + T::sqrt(v[0] * v[0] + four * a * (rh - r) * r));
    let ycoord =
        |r: T| half * (v[1] + T::sqrt(v[1] * v[1] + four * (T::one() - a) * (rh - r) * r));

    let (mut lo, mut hi) = (T::zero(), rh);
    for _ in 0..BISECTION_ITERS {
        let r = half * (lo + hi);
        let f = T::powf(xcoord(r), a) * T::powf(ycoord(r), T::one() - a) - r;
        if f > T::zero() {
            lo = r;
        } else {
            hi = r;
        }
    }
    let r = half * (lo + hi);
    z[0] = xcoord(r);
    z[1] = ycoord(r);
    z[2] = if v[2] > T::zero() { r } else { -r };
}
