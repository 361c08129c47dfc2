//! The dense matrix type and its arithmetic.
//!
//! `matrix` holds storage, access, transpose and reductions; `ops` the
//! scalar operators; `convert` the bridge to `ndarray`.
pub mod convert;
pub mod matrix;
pub mod ops;

pub use matrix::DenseMatrix;
