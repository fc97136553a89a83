use std::ops::Index;

use get_size2::GetSize;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

use crate::config;
use crate::error::TellegenError;
use crate::math::traits::Ring;

/// A dense matrix over a [ring](Ring), stored in row-major order.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Matrix<R: Ring> {
    num_rows: usize,
    num_cols: usize,
    entries: Vec<R>,
}

impl<R: Ring> GetSize for Matrix<R> {
    fn get_heap_size(&self) -> usize {
        self.entries.get_heap_size()
    }
}

impl<R: Ring> Matrix<R> {
    /// Builds a matrix by evaluating `f(i, j)` for every entry.
    pub fn from_fn(num_rows: usize, num_cols: usize, f: impl Fn(usize, usize) -> R) -> Self {
        let entries = (0..num_rows)
            .cartesian_product(0..num_cols)
            .map(|(i, j)| f(i, j))
            .collect();

        Self {
            num_rows,
            num_cols,
            entries,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn row(&self, i: usize) -> &[R] {
        &self.entries[i * self.num_cols..(i + 1) * self.num_cols]
    }

    /// The matrix product `self · other`.
    ///
    /// Rows of the product are computed in parallel if there are at least as
    /// many as the [configured cutoff](config::set_parallelization_cutoff).
    ///
    /// # Errors
    ///
    /// Fails if the number of columns of `self` is not the number of rows of
    /// `other`.
    pub fn multiply(&self, other: &Self) -> Result<Self, TellegenError> {
        if self.num_cols != other.num_rows {
            return Err(TellegenError::LengthMismatch {
                expected: self.num_cols,
                actual: other.num_rows,
            });
        }

        let num_cols = other.num_cols;
        let mut entries = vec![R::ZERO; self.num_rows * num_cols];
        if num_cols == 0 {
            return Ok(Self {
                num_rows: self.num_rows,
                num_cols,
                entries,
            });
        }

        let compute_row = |(i, product_row): (usize, &mut [R])| {
            for (k, &lhs) in self.row(i).iter().enumerate() {
                if lhs.is_zero() {
                    continue;
                }
                for (p, &rhs) in product_row.iter_mut().zip(other.row(k)) {
                    *p += lhs * rhs;
                }
            }
        };

        if self.num_rows >= config::parallelization_cutoff() {
            entries
                .par_chunks_mut(num_cols)
                .enumerate()
                .for_each(compute_row);
        } else {
            entries
                .chunks_mut(num_cols)
                .enumerate()
                .for_each(compute_row);
        }

        Ok(Self {
            num_rows: self.num_rows,
            num_cols,
            entries,
        })
    }
}

impl<R: Ring> Index<(usize, usize)> for Matrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.entries[row * self.num_cols + col]
    }
}
