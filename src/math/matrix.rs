use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use num_traits::Zero;

use crate::error::ShapeError;

/// Dense row-major matrix owning a contiguous buffer of `rows * cols` elements.
///
/// Element `(r, c)` is stored at offset `r * cols + c`. Cloning always copies
/// the buffer; two matrices never share storage.
#[derive(Debug, PartialEq)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> DenseMatrix<T> {
    /// Wrap a buffer the caller has already sized to `rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Self::from_shape_vec((rows, cols), data)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements, `rows * cols`.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size of the element buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.size() * mem::size_of::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Element at `(row, col)`. Only debug builds check the index against the shape.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &T {
        let offset = self.offset(row, col);
        &self.data[offset]
    }

    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Elements of logical row `row`, i.e. the range `[row * cols, (row + 1) * cols)`.
    pub fn row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows, "row {} out of bounds", row);
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.rows, "row {} out of bounds", row);
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }
}

impl<T: Clone> DenseMatrix<T> {
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Copy the first `rows * cols` elements of `src` into a new matrix.
    pub fn from_slice(rows: usize, cols: usize, src: &[T]) -> Self {
        let len = rows * cols;
        debug_assert!(
            src.len() >= len,
            "source buffer holds {} elements, {} required",
            src.len(),
            len
        );
        Self {
            data: src[..len].to_vec(),
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// New `cols x rows` matrix with `(i, j)` moved to `(j, i)`.
    pub fn transpose(&self) -> DenseMatrix<T> {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col].clone());
            }
        }
        DenseMatrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl<T: Clone + Zero> DenseMatrix<T> {
    /// Dimensioned matrix. The buffer is zero-filled, but callers are expected
    /// to populate it before reading.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::zeros(rows, cols)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, T::zero())
    }
}

impl<T: Copy + Zero> DenseMatrix<T> {
    /// Write the sum of each row into `out`, which must be `rows x 1`.
    ///
    /// The output shape is only checked in debug builds; see
    /// [`DenseMatrix::try_sum_cols_into`] for the checked form.
    pub fn sum_cols_into(&self, out: &mut DenseMatrix<T>) {
        debug_assert_eq!(out.shape(), (self.rows, 1), "sum_cols output shape");
        out.fill(T::zero());
        for (acc, row) in out.data.iter_mut().zip(self.rows_iter()) {
            *acc = row.iter().fold(*acc, |sum, &value| sum + value);
        }
    }

    pub fn try_sum_cols_into(&self, out: &mut DenseMatrix<T>) -> Result<(), ShapeError> {
        check_output(out, (self.rows, 1))?;
        self.sum_cols_into(out);
        Ok(())
    }

    /// Sum across columns: a `rows x 1` matrix holding each row's total.
    pub fn sum_cols(&self) -> DenseMatrix<T> {
        let mut out = DenseMatrix::zeros(self.rows, 1);
        self.sum_cols_into(&mut out);
        out
    }

    /// Write the sum of each column into `out`, which must be `1 x cols`.
    pub fn sum_rows_into(&self, out: &mut DenseMatrix<T>) {
        debug_assert_eq!(out.shape(), (1, self.cols), "sum_rows output shape");
        out.fill(T::zero());
        for row in self.rows_iter() {
            for (acc, &value) in out.data.iter_mut().zip(row) {
                *acc = *acc + value;
            }
        }
    }

    pub fn try_sum_rows_into(&self, out: &mut DenseMatrix<T>) -> Result<(), ShapeError> {
        check_output(out, (1, self.cols))?;
        self.sum_rows_into(out);
        Ok(())
    }

    /// Sum across rows: a `1 x cols` matrix holding each column's total.
    pub fn sum_rows(&self) -> DenseMatrix<T> {
        let mut out = DenseMatrix::zeros(1, self.cols);
        self.sum_rows_into(&mut out);
        out
    }
}

fn check_output<T>(out: &DenseMatrix<T>, expected: (usize, usize)) -> Result<(), ShapeError> {
    if out.shape() != expected {
        return Err(ShapeError::OutputShape {
            expected,
            found: out.shape(),
        });
    }
    Ok(())
}

impl<T> Default for DenseMatrix<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
        }
    }
}

impl<T: Clone> Clone for DenseMatrix<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Become a copy of `source`, keeping the current buffer only when the
    /// shapes already match.
    fn clone_from(&mut self, source: &Self) {
        if self.shape() == source.shape() {
            self.data.clone_from_slice(&source.data);
        } else {
            self.data = source.data.clone();
            self.rows = source.rows;
            self.cols = source.cols;
        }
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.at(index.0, index.1)
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        self.at_mut(index.0, index.1)
    }
}

impl<'a, T> IntoIterator for &'a DenseMatrix<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DenseMatrix<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Renders `[a, b, c;d, e, f]`: rows separated by `;`, elements by `, `.
impl<T: fmt::Display> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        write!(f, "[")?;
        for (row_idx, row) in self.rows_iter().enumerate() {
            if row_idx != 0 {
                write!(f, ";")?;
            }
            for (col_idx, value) in row.iter().enumerate() {
                if col_idx != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
        }
        write!(f, "]")
    }
}
