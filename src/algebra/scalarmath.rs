use super::{FloatT, ScalarMath};

impl<T: FloatT> ScalarMath for T {
    type T = T;

    fn clip(&self, min_thresh: T, max_thresh: T, min_new: T, max_new: T) -> T {
        if *self < min_thresh {
            min_new
        } else if *self > max_thresh {
            max_new
        } else {
            *self
        }
    }
}

/// Number of elements in the upper (or lower) triangle of a k x k matrix.
pub fn triangular_number(k: usize) -> usize {
    (k * (k + 1)) >> 1
}
