#![allow(non_snake_case)]
use crate::algebra::{FloatT, MatrixConcatenationError, SparseFormatError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// CscMatrix constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.  Use [`check_format`](CscMatrix::check_format) for a
    /// complete check returning an error instead.
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// all-zeros matrix of size (m, n)
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        CscMatrix {
            m,
            n,
            colptr: vec![0; n + 1],
            rowval: Vec::new(),
            nzval: Vec::new(),
        }
    }

    /// identity matrix of size (n, n)
    pub fn identity(n: usize) -> Self {
        CscMatrix {
            m: n,
            n,
            colptr: (0..=n).collect(),
            rowval: (0..n).collect(),
            nzval: vec![T::one(); n],
        }
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// true if the matrix is square
    pub fn is_square(&self) -> bool {
        self.m == self.n
    }

    /// Check that the matrix data is internally consistent:
    /// monotonic column pointers, in-bound and sorted row indices.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colptr.len() != self.n + 1
            || self.rowval.len() != self.nzval.len()
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }
        for col in 0..self.n {
            let rows = &self.rowval[self.colptr[col]..self.colptr[col + 1]];
            if rows.iter().any(|&r| r >= self.m) {
                return Err(SparseFormatError::BadRowval);
            }
            if rows.windows(2).any(|r| r[0] >= r[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }
        Ok(())
    }

    /// Vertical concatenation \[A; B\] of two matrices.
    pub fn vcat(A: &Self, B: &Self) -> Result<Self, MatrixConcatenationError> {
        if A.n != B.n {
            return Err(MatrixConcatenationError::IncompatibleDimension);
        }
        let mut colptr = vec![0; A.n + 1];
        let mut rowval = Vec::with_capacity(A.nnz() + B.nnz());
        let mut nzval = Vec::with_capacity(A.nnz() + B.nnz());

        for col in 0..A.n {
            for p in A.colptr[col]..A.colptr[col + 1] {
                rowval.push(A.rowval[p]);
                nzval.push(A.nzval[p]);
            }
            for p in B.colptr[col]..B.colptr[col + 1] {
                rowval.push(B.rowval[p] + A.m);
                nzval.push(B.nzval[p]);
            }
            colptr[col + 1] = rowval.len();
        }
        Ok(CscMatrix::new(A.m + B.m, A.n, colptr, rowval, nzval))
    }

    /// Upper triangular part of a square matrix.
    pub fn to_triu(&self) -> Self {
        assert!(self.is_square());
        let mut colptr = vec![0; self.n + 1];
        let mut rowval = Vec::with_capacity(self.nnz());
        let mut nzval = Vec::with_capacity(self.nnz());

        for col in 0..self.n {
            for p in self.colptr[col]..self.colptr[col + 1] {
                if self.rowval[p] <= col {
                    rowval.push(self.rowval[p]);
                    nzval.push(self.nzval[p]);
                }
            }
            colptr[col + 1] = rowval.len();
        }
        CscMatrix::new(self.m, self.n, colptr, rowval, nzval)
    }

    /// Iterator over the (row, value) entries of a column.
    pub(crate) fn col_iter(&self, col: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let rng = self.colptr[col]..self.colptr[col + 1];
        self.rowval[rng.clone()]
            .iter()
            .zip(&self.nzval[rng])
            .map(|(&r, &v)| (r, v))
    }
}

/// Construct a CscMatrix from a dense slice of rows, dropping
/// exact zeros.  Intended mainly for small examples and tests.
impl<T: FloatT, const N: usize> From<&[[T; N]]> for CscMatrix<T> {
    fn from(rows: &[[T; N]]) -> Self {
        let m = rows.len();
        let n = N;
        let mut colptr = vec![0; n + 1];
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        for col in 0..n {
            for (row, vals) in rows.iter().enumerate() {
                if vals[col] != T::zero() {
                    rowval.push(row);
                    nzval.push(vals[col]);
                }
            }
            colptr[col + 1] = rowval.len();
        }
        CscMatrix::new(m, n, colptr, rowval, nzval)
    }
}

impl<T: FloatT, const N: usize, const M: usize> From<&[[T; N]; M]> for CscMatrix<T> {
    fn from(rows: &[[T; N]; M]) -> Self {
        CscMatrix::from(&rows[..])
    }
}
