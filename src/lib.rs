//! thin-matrix: a minimal dense matrix value type.
//!
//! This crate provides `DenseMatrix<T>`, an owning row-major 2D buffer with
//! scalar arithmetic, transpose, row/column sums, and a raw binary file
//! format for persisting matrices between runs.
//!
//! The design favors a small surface: no matrix products, no decompositions,
//! and shape contracts on the hot paths are only checked in debug builds.
//! Checked alternatives (`get`, `from_shape_vec`, `try_sum_*_into`) exist
//! for callers that want errors instead.
pub mod config;
pub mod error;
pub mod io;
pub mod math;

pub use config::{HeaderWidth, MatrixFileConfig};
pub use error::ShapeError;
pub use math::DenseMatrix;
