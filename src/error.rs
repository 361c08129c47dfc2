use std::error::Error;
use std::fmt;

/// Shape mismatch reported by the checked matrix constructors and reductions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A buffer of `len` elements cannot back a `rows x cols` matrix.
    BufferLength { rows: usize, cols: usize, len: usize },
    /// A reduction output was `found` but the input requires `expected`.
    OutputShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShapeError::BufferLength { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            ShapeError::OutputShape { expected, found } => write!(
                f,
                "output matrix has shape ({}, {}) but ({}, {}) is required",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl Error for ShapeError {}
