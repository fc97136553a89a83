//! The isomorphism Φ between the tensor product `R[x,y]/(P,Q)` and the
//! univariate quotient ring `R[z]/(P⊙Q)` that maps `z` to `xy`.
//!
//! Elements of the tensor product are given as arrays `b` of `deg(P)` rows
//! with `deg(Q)` entries each, where `b[i][j]` is the coefficient of `xⁱyʲ`.
//! Elements of `R[z]/(P⊙Q)` are given by their `deg(P)·deg(Q)` monomial
//! coordinates.
//!
//! Φ is an isomorphism if and only if the products of the roots of `P` and
//! `Q` are pairwise distinct, _i.e._, if `P⊙Q` is squarefree. Both
//! directions are computed through the trace functional, which the
//! isomorphism preserves: `Tr(F) = Tr(F(xy))`.
//!
//! There are two implementations of each direction. The naïve ones, [`phi1`]
//! and [`inverse_phi1`], take time O(mn·max(m, n)) up to logarithmic factors.
//! The fast ones, [`phi2`] and [`inverse_phi2`], split the computation into
//! baby steps and giant steps and recombine blocks through a single matrix
//! product. They need `Q(0) ≠ 0`.

use std::sync::OnceLock;

use rayon::prelude::*;

use crate::composed_product::composed_product;
use crate::config;
use crate::dual_basis::DualBasis;
use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

mod fast;
mod naive;

/// An element of the tensor product `R[x,y]/(P,Q)`: `deg(P)` rows of
/// `deg(Q)` coefficients.
pub type TensorArray<R> = Vec<Vec<R>>;

/// Everything needed to evaluate Φ and Φ⁻¹ for one pair of moduli.
///
/// Built once, then shared by reference. All precomputations that depend on
/// the moduli only, like the traces of the powers of `x`, happen here.
#[derive(Debug, Clone)]
pub struct Isomorphism<R: Ring> {
    p: DualBasis<R>,
    q: DualBasis<R>,
    r: DualBasis<R>,

    /// `Tr(xᵏ)` in `R[x]/(P)` for `k < deg(P)·deg(Q) + deg(P) - 1`
    traces_p: Vec<R>,

    fast: OnceLock<Result<fast::Precomputation<R>, TellegenError>>,
}

impl<R: Ring> Isomorphism<R> {
    /// Computes the [composed product](composed_product) `p⊙q` and sets up the
    /// isomorphism.
    ///
    /// # Errors
    ///
    /// Fails if `p` or `q` is not monic, constant, or not squarefree, or if
    /// `p⊙q` is not squarefree.
    pub fn new(p: Polynomial<R>, q: Polynomial<R>) -> Result<Self, TellegenError> {
        let r = composed_product(&p, &q)?;
        Self::with_composed_product(p, q, r)
    }

    /// Sets up the isomorphism with a known composed product `r = p⊙q`.
    ///
    /// Only the degree of `r` is verified, not that it is the composed
    /// product.
    ///
    /// # Errors
    ///
    /// Fails if any of the moduli is not monic, constant, or not squarefree,
    /// or if the degree of `r` is not `deg(p)·deg(q)`.
    pub fn with_composed_product(
        p: Polynomial<R>,
        q: Polynomial<R>,
        r: Polynomial<R>,
    ) -> Result<Self, TellegenError> {
        let p = DualBasis::new(p)?;
        let q = DualBasis::new(q)?;
        let r = DualBasis::new(r)?;

        let (m, n) = (p.degree(), q.degree());
        if r.degree() != m * n {
            return Err(TellegenError::LengthMismatch {
                expected: m * n,
                actual: r.degree(),
            });
        }

        let traces_p = p.trace_vector(m * n + m - 1)?;

        Ok(Self {
            p,
            q,
            r,
            traces_p,
            fast: OnceLock::new(),
        })
    }

    pub fn p(&self) -> &Polynomial<R> {
        self.p.modulus()
    }

    pub fn q(&self) -> &Polynomial<R> {
        self.q.modulus()
    }

    /// The composed product `p⊙q`.
    pub fn r(&self) -> &Polynomial<R> {
        self.r.modulus()
    }

    /// Φ, computed by whichever algorithm is expected to be faster.
    ///
    /// See also [`config::set_fast_isomorphism_cutoff`].
    pub fn phi(&self, b: &[Vec<R>]) -> Result<Vec<R>, TellegenError> {
        if self.use_fast_path(config::fast_isomorphism_cutoff()) {
            self.phi2(b)
        } else {
            self.phi1(b)
        }
    }

    /// Φ⁻¹, computed by whichever algorithm is expected to be faster.
    ///
    /// See also [`config::set_fast_inverse_isomorphism_cutoff`].
    pub fn inverse_phi(&self, a: &[R]) -> Result<TensorArray<R>, TellegenError> {
        if self.use_fast_path(config::fast_inverse_isomorphism_cutoff()) {
            self.inverse_phi2(a)
        } else {
            self.inverse_phi1(a)
        }
    }

    fn use_fast_path(&self, cutoff: usize) -> bool {
        let size = self.p.degree() * self.q.degree();
        if size < cutoff {
            log::debug!("isomorphism of size {size} below cutoff {cutoff}: naïve path");
            return false;
        }

        let fast_path_available = self.fast_precomputation().is_ok();
        if !fast_path_available {
            log::debug!("image of y is not invertible: naïve path");
        }

        fast_path_available
    }

    fn fast_precomputation(&self) -> Result<&fast::Precomputation<R>, TellegenError> {
        self.fast
            .get_or_init(|| fast::Precomputation::new(&self.p, &self.q, &self.r))
            .as_ref()
            .map_err(Clone::clone)
    }

    fn check_array(&self, b: &[Vec<R>]) -> Result<(), TellegenError> {
        let (m, n) = (self.p.degree(), self.q.degree());
        if b.len() != m || b.iter().any(|row| row.len() != n) {
            return Err(TellegenError::MalformedArray {
                expected_rows: m,
                expected_cols: n,
            });
        }

        Ok(())
    }

    fn check_coordinates(&self, a: &[R]) -> Result<(), TellegenError> {
        let expected = self.r.degree();
        if a.len() != expected {
            return Err(TellegenError::LengthMismatch {
                expected,
                actual: a.len(),
            });
        }

        Ok(())
    }

    /// Turns rows that hold x-dual coordinates of y-monomial coefficients into
    /// a [`TensorArray`]: converts every column to monomial coordinates in `x`.
    fn x_dual_rows_to_array(&self, rows: &[Vec<R>]) -> Result<TensorArray<R>, TellegenError> {
        let (m, n) = (self.p.degree(), self.q.degree());
        let columns = map_indices(n, |j| {
            let column = rows.iter().map(|row| row[j]).collect::<Vec<_>>();
            self.p.to_monomial(&column)
        })?;

        let array = (0..m)
            .map(|i| columns.iter().map(|column| column[i]).collect())
            .collect();

        Ok(array)
    }
}

/// Evaluates `f` on `0..count`, in parallel if `count` reaches the
/// [configured cutoff](config::set_parallelization_cutoff).
pub(crate) fn map_indices<U, F>(count: usize, f: F) -> Result<Vec<U>, TellegenError>
where
    U: Send,
    F: Fn(usize) -> Result<U, TellegenError> + Sync + Send,
{
    if count >= config::parallelization_cutoff() {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

/// Φ(b) with the naïve algorithm. See [`Isomorphism::phi1`].
pub fn phi1<R: Ring>(
    b: &[Vec<R>],
    p: &Polynomial<R>,
    q: &Polynomial<R>,
    r: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    Isomorphism::with_composed_product(p.clone(), q.clone(), r.clone())?.phi1(b)
}

/// Φ⁻¹(a) with the naïve algorithm. See [`Isomorphism::inverse_phi1`].
pub fn inverse_phi1<R: Ring>(
    a: &[R],
    p: &Polynomial<R>,
    q: &Polynomial<R>,
    r: &Polynomial<R>,
) -> Result<TensorArray<R>, TellegenError> {
    Isomorphism::with_composed_product(p.clone(), q.clone(), r.clone())?.inverse_phi1(a)
}

/// Φ(b) with the baby-step giant-step algorithm. See [`Isomorphism::phi2`].
pub fn phi2<R: Ring>(
    b: &[Vec<R>],
    p: &Polynomial<R>,
    q: &Polynomial<R>,
    r: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    Isomorphism::with_composed_product(p.clone(), q.clone(), r.clone())?.phi2(b)
}

/// Φ⁻¹(a) with the baby-step giant-step algorithm. See
/// [`Isomorphism::inverse_phi2`].
pub fn inverse_phi2<R: Ring>(
    a: &[R],
    p: &Polynomial<R>,
    q: &Polynomial<R>,
    r: &Polynomial<R>,
) -> Result<TensorArray<R>, TellegenError> {
    Isomorphism::with_composed_product(p.clone(), q.clone(), r.clone())?.inverse_phi2(a)
}
