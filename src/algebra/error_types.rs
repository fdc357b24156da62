use thiserror::Error;

/// Error type returned by matrix concatenation operations.
#[derive(Error, Debug)]
pub enum MatrixConcatenationError {
    #[error("Incompatible dimensions")]
    /// Indicates inputs have incompatible dimension
    IncompatibleDimension,
}

#[derive(Error, Debug)]
/// Error type returned by sparse matrix assembly operations.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Data is not sorted by row index within each column
    #[error("Data is not sorted by row index within each column")]
    BadRowOrdering,
    #[error("Row value exceeds the matrix row dimension")]
    /// Row value exceeds the matrix row dimension
    BadRowval,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
}

/// Error type returned by dense factorization routines.
#[derive(Error, Debug)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    /// Matrix dimension fields and/or array lengths are incompatible
    IncompatibleDimension,
    #[error("Eigendecomposition failed to converge")]
    /// Jacobi eigendecomposition failed to converge
    Eigen,
    #[error("Matrix is not positive definite")]
    /// Cholesky factorization found a nonpositive pivot
    Cholesky,
    #[error("Zero pivot in LDL factorization")]
    /// Quasidefinite LDL factorization found a zero pivot
    LDL,
}
