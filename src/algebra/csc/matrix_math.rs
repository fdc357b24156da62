use crate::algebra::{
    CscMatrix, FloatT, MatrixMath, MatrixVectorMultiply, SymMatrixVectorMultiply,
};

impl<T: FloatT> MatrixMath for CscMatrix<T> {
    type T = T;

    fn col_norms_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);
        for (col, norm) in norms.iter_mut().enumerate() {
            for p in self.colptr[col]..self.colptr[col + 1] {
                *norm = T::max(*norm, T::abs(self.nzval[p]));
            }
        }
    }

    fn col_norms_sym_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);
        for col in 0..self.n {
            for p in self.colptr[col]..self.colptr[col + 1] {
                let row = self.rowval[p];
                let val = T::abs(self.nzval[p]);
                norms[col] = T::max(norms[col], val);
                norms[row] = T::max(norms[row], val);
            }
        }
    }

    fn row_norms_no_reset(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.m);
        for (&row, &val) in self.rowval.iter().zip(&self.nzval) {
            norms[row] = T::max(norms[row], T::abs(val));
        }
    }

    fn scale(&mut self, c: T) {
        for v in &mut self.nzval {
            *v *= c;
        }
    }

    fn negate(&mut self) {
        for v in &mut self.nzval {
            *v = -*v;
        }
    }

    fn lscale(&mut self, l: &[T]) {
        assert_eq!(l.len(), self.m);
        for (&row, v) in self.rowval.iter().zip(&mut self.nzval) {
            *v *= l[row];
        }
    }

    fn lrscale(&mut self, l: &[T], r: &[T]) {
        assert_eq!(l.len(), self.m);
        assert_eq!(r.len(), self.n);
        for col in 0..self.n {
            for p in self.colptr[col]..self.colptr[col + 1] {
                self.nzval[p] *= l[self.rowval[p]] * r[col];
            }
        }
    }

    fn quad_form(&self, y: &[T], x: &[T]) -> T {
        assert!(self.is_square());
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.n);
        let mut out = T::zero();
        for col in 0..self.n {
            for p in self.colptr[col]..self.colptr[col + 1] {
                let row = self.rowval[p];
                assert!(row <= col, "matrix must be upper triangular");
                let v = self.nzval[p];
                if row == col {
                    out += v * x[col] * y[col];
                } else {
                    out += v * (x[col] * y[row] + x[row] * y[col]);
                }
            }
        }
        out
    }
}

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(y.len(), self.m);
        assert_eq!(x.len(), self.n);
        for v in &mut *y {
            *v *= b;
        }
        for (col, &xc) in x.iter().enumerate() {
            let axc = a * xc;
            for p in self.colptr[col]..self.colptr[col + 1] {
                y[self.rowval[p]] += self.nzval[p] * axc;
            }
        }
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(y.len(), self.n);
        assert_eq!(x.len(), self.m);
        for (col, v) in y.iter_mut().enumerate() {
            let mut sum = T::zero();
            for p in self.colptr[col]..self.colptr[col + 1] {
                sum += self.nzval[p] * x[self.rowval[p]];
            }
            *v = a * sum + b * *v;
        }
    }
}

impl<T: FloatT> SymMatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn symv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert!(self.is_square());
        assert_eq!(y.len(), self.n);
        assert_eq!(x.len(), self.n);
        for v in &mut *y {
            *v *= b;
        }
        for col in 0..self.n {
            for p in self.colptr[col]..self.colptr[col + 1] {
                let row = self.rowval[p];
                assert!(row <= col, "matrix must be upper triangular");
                let v = a * self.nzval[p];
                y[row] += v * x[col];
                if row != col {
                    y[col] += v * x[row];
                }
            }
        }
    }
}
