//! Element-wise scalar arithmetic for `DenseMatrix`.
//!
//! The compound operators mutate in place. The binary operators consume an
//! owned matrix and reuse its buffer, or copy when applied to a reference.
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::math::matrix::DenseMatrix;

macro_rules! scalar_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl<T> $assign_trait<T> for DenseMatrix<T>
        where
            T: Copy + $op_trait<Output = T>,
        {
            fn $assign_fn(&mut self, scalar: T) {
                for value in self.iter_mut() {
                    *value = *value $op scalar;
                }
            }
        }

        impl<T> $op_trait<T> for DenseMatrix<T>
        where
            T: Copy + $op_trait<Output = T>,
        {
            type Output = DenseMatrix<T>;

            fn $op_fn(mut self, scalar: T) -> Self::Output {
                self.$assign_fn(scalar);
                self
            }
        }

        impl<'a, T> $op_trait<T> for &'a DenseMatrix<T>
        where
            T: Copy + $op_trait<Output = T>,
        {
            type Output = DenseMatrix<T>;

            fn $op_fn(self, scalar: T) -> Self::Output {
                let mut out = self.clone();
                out.$assign_fn(scalar);
                out
            }
        }
    };
}

scalar_op!(Mul, mul, MulAssign, mul_assign, *);
scalar_op!(Div, div, DivAssign, div_assign, /);
scalar_op!(Add, add, AddAssign, add_assign, +);
scalar_op!(Sub, sub, SubAssign, sub_assign, -);
