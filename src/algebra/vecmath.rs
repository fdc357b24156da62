use super::{FloatT, ScalarMath, VectorMath};
use itertools::izip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn scalarop_from(&mut self, op: impl Fn(T) -> T, v: &[T]) -> &mut Self {
        for (x, v) in self.iter_mut().zip(v) {
            *x = op(*v);
        }
        self
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.scalarop(|_x| c)
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn recip(&mut self) -> &mut Self {
        self.scalarop(T::recip)
    }

    fn rsqrt(&mut self) -> &mut Self {
        self.scalarop(|x| T::recip(T::sqrt(x)))
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn hadamard(&mut self, y: &[T]) -> &mut Self {
        for (x, y) in self.iter_mut().zip(y) {
            *x *= *y;
        }
        self
    }

    fn clip(&mut self, min_thresh: T, max_thresh: T, min_new: T, max_new: T) -> &mut Self {
        self.scalarop(|x| x.clip(min_thresh, max_thresh, min_new, max_new))
    }

    fn dot(&self, y: &[T]) -> T {
        self.iter()
            .zip(y)
            .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
    }

    fn dist(&self, y: &Self) -> T {
        let dist2 = self
            .iter()
            .zip(y)
            .fold(T::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y));
        T::sqrt(dist2)
    }

    fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    fn norm_scaled(&self, v: &[T]) -> T {
        assert_eq!(self.len(), v.len());
        let total = self
            .iter()
            .zip(v)
            .fold(T::zero(), |acc, (&x, &v)| acc + (x * v) * (x * v));
        T::sqrt(total)
    }

    fn norm_inf(&self) -> T {
        self.iter().fold(T::zero(), |acc, x| T::max(acc, x.abs()))
    }

    fn mean(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            let num = T::from_usize(self.len()).unwrap();
            self.sum() / num
        }
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|&x| T::is_finite(x))
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());
        for (y, x) in self.iter_mut().zip(x) {
            *y = a * *x + b * *y;
        }
        self
    }

    fn waxpby(&mut self, a: T, x: &[T], b: T, y: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        assert_eq!(self.len(), y.len());
        for (w, (x, y)) in self.iter_mut().zip(izip!(x, y)) {
            *w = a * *x + b * *y;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norms() {
        let x = [1.0, -2.0, 3.0];
        let y = [2.0, 1.0, -1.0];
        assert_eq!(x.dot(&y), -3.0);
        assert_eq!(x.norm_inf(), 3.0);
        assert_eq!(x.sumsq(), 14.0);
        assert!((x.norm() - 14.0f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_axpby() {
        let mut y = vec![1.0, 1.0];
        let x = [2.0, -4.0];
        y.axpby(0.5, &x, 2.0);
        assert_eq!(y, vec![3.0, 0.0]);

        let mut w = vec![0.0, 0.0];
        w.waxpby(1.0, &x, -1.0, &[1.0, 1.0]);
        assert_eq!(w, vec![1.0, -5.0]);
    }

    #[test]
    fn test_clip_and_scale() {
        let mut x = vec![1e-6, 0.5, 1e6];
        x.clip(1e-3, 1e3, 1e-3, 1e3);
        assert_eq!(x, vec![1e-3, 0.5, 1e3]);
        x.scale(2.0);
        assert_eq!(x[1], 1.0);
    }

    #[test]
    fn test_norm_scaled() {
        let x = [3.0, 4.0];
        let v = [2.0, 0.5];
        assert!((x.norm_scaled(&v) - (36.0f64 + 4.0).sqrt()).abs() < 1e-15);
    }
}
