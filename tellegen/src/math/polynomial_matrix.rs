use get_size2::GetSize;
use itertools::Itertools;
use num_traits::Zero;
use rayon::prelude::*;

use crate::config;
use crate::error::TellegenError;
use crate::math::matrix::Matrix;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

/// A matrix whose entries are [polynomials](Polynomial), stored as a vector of
/// rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PolynomialMatrix<R: Ring> {
    num_cols: usize,
    rows: Vec<Vec<Polynomial<R>>>,
}

impl<R: Ring> PolynomialMatrix<R> {
    /// # Errors
    ///
    /// Fails if the rows are not all of length `num_cols`.
    pub fn from_rows(
        rows: Vec<Vec<Polynomial<R>>>,
        num_cols: usize,
    ) -> Result<Self, TellegenError> {
        if rows.iter().any(|row| row.len() != num_cols) {
            return Err(TellegenError::MalformedArray {
                expected_rows: rows.len(),
                expected_cols: num_cols,
            });
        }

        Ok(Self { num_cols, rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn entry(&self, row: usize, col: usize) -> &Polynomial<R> {
        &self.rows[row][col]
    }

    /// The number of coefficients needed to hold any entry.
    fn max_len(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .map(|p| usize::try_from(p.degree() + 1).unwrap_or(0))
            .max()
            .unwrap_or(0)
    }

    /// The matrix product `self · other`.
    ///
    /// If some operand has only short entries, both operands are
    /// [flattened](Self::flattened_multiply) into one product of matrices over
    /// the coefficient ring. Otherwise, every entry product is a fast
    /// [polynomial multiplication](Polynomial::multiply).
    ///
    /// # Errors
    ///
    /// Fails if the number of columns of `self` is not the number of rows of
    /// `other`.
    pub fn multiply(&self, other: &Self) -> Result<Self, TellegenError> {
        if self.num_cols != other.num_rows() {
            return Err(TellegenError::LengthMismatch {
                expected: self.num_cols,
                actual: other.num_rows(),
            });
        }

        let lhs_len = self.max_len();
        let rhs_len = other.max_len();
        if lhs_len == 0 || rhs_len == 0 {
            let rows = vec![vec![Polynomial::zero(); other.num_cols]; self.num_rows()];
            return Ok(Self {
                num_cols: other.num_cols,
                rows,
            });
        }

        if lhs_len.min(rhs_len) < Polynomial::<R>::KARATSUBA_CUTOFF_THRESHOLD {
            self.flattened_multiply(other, lhs_len, rhs_len)
        } else {
            Ok(self.entrywise_multiply(other))
        }
    }

    /// The left operand gets one row per entry row and coefficient, the right
    /// one one column per entry column and coefficient. A single [ring matrix
    /// product](Matrix::multiply) then yields every coefficient product, which
    /// only need to be summed along the anti-diagonals.
    fn flattened_multiply(
        &self,
        other: &Self,
        lhs_len: usize,
        rhs_len: usize,
    ) -> Result<Self, TellegenError> {
        let lhs = Matrix::from_fn(self.num_rows() * lhs_len, self.num_cols, |row, k| {
            self.rows[row / lhs_len][k].coefficient(row % lhs_len)
        });
        let rhs = Matrix::from_fn(other.num_rows(), other.num_cols * rhs_len, |k, col| {
            other.rows[k][col / rhs_len].coefficient(col % rhs_len)
        });
        log::trace!(
            "flattened operands occupy {} bytes",
            lhs.get_size() + rhs.get_size()
        );
        let coefficient_products = lhs.multiply(&rhs)?;

        let product_len = lhs_len + rhs_len - 1;
        let rows = (0..self.num_rows())
            .map(|i| {
                (0..other.num_cols)
                    .map(|l| {
                        let mut coefficients = vec![R::ZERO; product_len];
                        for (a, b) in (0..lhs_len).cartesian_product(0..rhs_len) {
                            let row = i * lhs_len + a;
                            let col = l * rhs_len + b;
                            coefficients[a + b] += coefficient_products[(row, col)];
                        }
                        Polynomial::new(coefficients)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            num_cols: other.num_cols,
            rows,
        })
    }

    /// Rows of the product are computed in parallel if there are at least as
    /// many as the [configured cutoff](config::set_parallelization_cutoff).
    fn entrywise_multiply(&self, other: &Self) -> Self {
        let compute_row = |row: &Vec<Polynomial<R>>| {
            (0..other.num_cols)
                .map(|l| {
                    row.iter()
                        .zip(&other.rows)
                        .fold(Polynomial::zero(), |acc, (lhs, rhs_row)| {
                            acc + lhs.multiply(&rhs_row[l])
                        })
                })
                .collect::<Vec<_>>()
        };

        let rows = if self.num_rows() >= config::parallelization_cutoff() {
            self.rows.par_iter().map(compute_row).collect()
        } else {
            self.rows.iter().map(compute_row).collect()
        };

        Self {
            num_cols: other.num_cols,
            rows,
        }
    }
}
