//! Conversions between `DenseMatrix` and `ndarray::Array2`.
use ndarray::Array2;

use crate::math::matrix::DenseMatrix;

impl<T: Clone> DenseMatrix<T> {
    /// Copy into a standard-layout `ndarray::Array2` of the same shape.
    pub fn to_ndarray(&self) -> Array2<T> {
        Array2::from_shape_fn(self.shape(), |(row, col)| self[(row, col)].clone())
    }
}

impl<T> DenseMatrix<T> {
    /// Hand the buffer to `ndarray` without copying.
    pub fn into_ndarray(self) -> Array2<T> {
        let shape = self.shape();
        Array2::from_shape_vec(shape, self.into_vec())
            .unwrap_or_else(|_| unreachable!("buffer length is always rows * cols"))
    }
}

impl<T> From<DenseMatrix<T>> for Array2<T> {
    fn from(matrix: DenseMatrix<T>) -> Self {
        matrix.into_ndarray()
    }
}

/// Any memory layout is accepted; elements are taken in logical row-major order.
impl<T: Clone> From<Array2<T>> for DenseMatrix<T> {
    fn from(array: Array2<T>) -> Self {
        DenseMatrix::from(&array)
    }
}

impl<T: Clone> From<&Array2<T>> for DenseMatrix<T> {
    fn from(array: &Array2<T>) -> Self {
        let (rows, cols) = array.dim();
        DenseMatrix::from_parts(rows, cols, array.iter().cloned().collect())
    }
}
