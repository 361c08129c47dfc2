//! IO utilities for persisting matrices.
//!
//! `matrix_file` adds `write`/`read`/`save`/`load` methods to
//! [`DenseMatrix`](crate::math::DenseMatrix) for element types that are
//! plain old data.

pub mod matrix_file;
