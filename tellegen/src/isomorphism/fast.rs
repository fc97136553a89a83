use get_size2::GetSize;
use num_traits::One;
use num_traits::Zero;

use crate::composed_product::unit;
use crate::dual_basis::DualBasis;
use crate::embedding::embed;
use crate::error::TellegenError;
use crate::isomorphism::Isomorphism;
use crate::isomorphism::TensorArray;
use crate::isomorphism::map_indices;
use crate::math::polynomial::Polynomial;
use crate::math::polynomial_matrix::PolynomialMatrix;
use crate::math::traits::Ring;

/// The parts of the baby-step giant-step algorithms that only depend on the
/// moduli.
///
/// With `m = deg(P)`, `n = deg(Q)`, let `S` in `R[z]/(P⊙Q)` be the preimage of
/// `y`. Then `x` corresponds to `z·S⁻¹`, and
///
/// ```text
/// Σ b[i][j]·xⁱyʲ  ↦  S^-(m-1) · Σ_d C_d(z)·S^d,   C_d(z) = Σᵢ b[i][i+d-(m-1)]·zⁱ
/// ```
///
/// where `d` runs over the `m + n - 1` diagonals of `b`. Writing `d = q·i + k`
/// with `k < q` gives `p` giant steps in `S^q` over blocks of `q` baby steps.
#[derive(Debug, Clone)]
pub(super) struct Precomputation<R: Ring> {
    num_baby_steps: usize,
    num_giant_steps: usize,

    /// `S^q`
    giant_step: Polynomial<R>,

    /// `S^-(m-1)`
    unscaling: Polynomial<R>,

    /// `q`×`n` matrix; entry `(k, l)` holds the coefficients `l·m..(l+1)·m` of
    /// `S^k`
    baby_step_blocks: PolynomialMatrix<R>,

    /// `n`×`q` matrix; entry `(l, k)` is the reversal of entry `(k, l)` of
    /// the baby step blocks to length `m`
    reversed_baby_step_blocks: PolynomialMatrix<R>,
}

impl<R: Ring> Precomputation<R> {
    /// # Errors
    ///
    /// Fails with [`TellegenError::NotInvertible`] if the preimage of `y` is
    /// not invertible, which is the case if `Q(0)` is not a unit.
    pub(super) fn new(
        p: &DualBasis<R>,
        q: &DualBasis<R>,
        r: &DualBasis<R>,
    ) -> Result<Self, TellegenError> {
        let (m, n) = (p.degree(), q.degree());
        let num_diagonals = m + n - 1;
        let mut num_baby_steps = num_diagonals.isqrt();
        if num_baby_steps * num_baby_steps < num_diagonals {
            num_baby_steps += 1;
        }
        let num_giant_steps = num_diagonals.div_ceil(num_baby_steps);
        log::debug!(
            "baby-step giant-step isomorphism: {num_giant_steps} giant steps \
            of {num_baby_steps} baby steps"
        );

        let trace_of_one = p.to_dual(&unit(m))?;
        let dual_of_y = q.dual_of(&Polynomial::x_to_the(1))?;
        let y_image_dual = embed(&trace_of_one, p.modulus(), &dual_of_y, q.modulus(), m * n)?;
        let y_image = Polynomial::new(r.to_monomial(&y_image_dual)?);
        let y_image_inverse = y_image.inverse_mod(r.modulus())?;
        let unscaling = y_image_inverse.mod_pow((m - 1) as u64, r.modulus())?;

        let mut baby_steps = Vec::with_capacity(num_baby_steps + 1);
        baby_steps.push(Polynomial::one().reduce(r.modulus())?);
        for k in 0..num_baby_steps {
            let next = r.multiply_mod(&baby_steps[k], &y_image)?;
            baby_steps.push(next);
        }
        log::trace!("baby steps occupy {} bytes", baby_steps.get_size());

        let chunks = baby_steps[..num_baby_steps]
            .iter()
            .map(|power| {
                let coefficients = power.padded_coefficients(m * n);
                coefficients
                    .chunks(m)
                    .map(|chunk| Polynomial::new(chunk.to_vec()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let reversed_chunks = (0..n)
            .map(|l| {
                chunks
                    .iter()
                    .map(|row| row[l].reverse_to_length(m))
                    .collect()
            })
            .collect();

        let giant_step = baby_steps.swap_remove(num_baby_steps);
        let baby_step_blocks = PolynomialMatrix::from_rows(chunks, n)?;
        let reversed_baby_step_blocks =
            PolynomialMatrix::from_rows(reversed_chunks, num_baby_steps)?;

        Ok(Self {
            num_baby_steps,
            num_giant_steps,
            giant_step,
            unscaling,
            baby_step_blocks,
            reversed_baby_step_blocks,
        })
    }
}

impl<R: Ring> Isomorphism<R> {
    /// Φ(b) with the baby-step giant-step algorithm. Agrees with
    /// [`phi1`](Self::phi1).
    ///
    /// The `p`×`q` matrix of diagonals `C_{q·i+k}` times the `q`×`n` matrix of
    /// baby step blocks gives, in row `i`, the blocks of
    /// `Vᵢ = Σₖ C_{q·i+k}·S^k`. The giant steps combine these in Horner's
    /// scheme.
    ///
    /// # Errors
    ///
    /// Fails if `b` is not a `deg(P)`×`deg(Q)` array, or with
    /// [`TellegenError::NotInvertible`] if `Q(0)` is not a unit.
    pub fn phi2(&self, b: &[Vec<R>]) -> Result<Vec<R>, TellegenError> {
        self.check_array(b)?;
        let fast = self.fast_precomputation()?;
        let (m, n) = (self.p.degree(), self.q.degree());

        let diagonal = |d: usize| {
            let coefficients = (0..m)
                .map(|i| {
                    (i + d)
                        .checked_sub(m - 1)
                        .and_then(|j| b[i].get(j))
                        .copied()
                        .unwrap_or(R::ZERO)
                })
                .collect();
            Polynomial::new(coefficients)
        };
        let num_diagonals = m + n - 1;
        let diagonals = (0..fast.num_giant_steps)
            .map(|i| {
                (0..fast.num_baby_steps)
                    .map(|k| fast.num_baby_steps * i + k)
                    .map(|d| {
                        if d < num_diagonals {
                            diagonal(d)
                        } else {
                            Polynomial::zero()
                        }
                    })
                    .collect()
            })
            .collect();
        let diagonals = PolynomialMatrix::from_rows(diagonals, fast.num_baby_steps)?;
        let blocks = diagonals.multiply(&fast.baby_step_blocks)?;

        let giant_step_summands = map_indices(fast.num_giant_steps, |i| {
            let mut summand = Polynomial::zero();
            for l in 0..n {
                summand += blocks.entry(i, l).shift_coefficients(l * m);
            }
            self.r.reduce(&summand)
        })?;

        let mut acc = Polynomial::zero();
        for summand in giant_step_summands.into_iter().rev() {
            acc = self.r.reduce(&(acc.multiply(&fast.giant_step) + summand))?;
        }
        let image = self.r.multiply_mod(&acc, &fast.unscaling)?;

        Ok(image.padded_coefficients(m * n))
    }

    /// Φ⁻¹(a) with the transposed baby-step giant-step algorithm. Agrees with
    /// [`inverse_phi1`](Self::inverse_phi1).
    ///
    /// Let ℓ be the dual of `a`, and `ℓᵢ = ℓ ∘ S^-(m-1) ∘ S^(q·i)`. The traces
    /// `Tr(F(xy)·xˢyᵗ)` are `ℓᵢ(S^k·zˢ)` for `t - s + m - 1 = q·i + k`. The
    /// giant steps compute the `ℓᵢ` by transposed modular multiplication,
    /// the baby steps are evaluated at once through a matrix of middle
    /// products.
    ///
    /// # Errors
    ///
    /// Fails if `a` does not have `deg(P)·deg(Q)` elements, or with
    /// [`TellegenError::NotInvertible`] if `Q(0)` is not a unit.
    pub fn inverse_phi2(&self, a: &[R]) -> Result<TensorArray<R>, TellegenError> {
        self.check_coordinates(a)?;
        let fast = self.fast_precomputation()?;
        let (m, n) = (self.p.degree(), self.q.degree());
        let size = m * n;

        let dual = self.r.to_dual(a)?;
        let mut functionals = Vec::with_capacity(fast.num_giant_steps);
        functionals.push(self.r.mul_mod_t(&dual, &fast.unscaling, size - 1)?);
        for i in 1..fast.num_giant_steps {
            let previous = &functionals[i - 1];
            let next = self.r.mul_mod_t(previous, &fast.giant_step, size - 1)?;
            functionals.push(next);
        }

        let windows = map_indices(fast.num_giant_steps, |i| {
            let extension = self.r.extend(&functionals[i], size + m - 1)?;
            let windows = (0..n)
                .map(|l| Polynomial::new(extension[l * m..l * m + 2 * m - 1].to_vec()))
                .collect::<Vec<_>>();
            Ok(windows)
        })?;
        let windows = PolynomialMatrix::from_rows(windows, n)?;
        let middle_products = windows.multiply(&fast.reversed_baby_step_blocks)?;

        let trace = |s: usize, t: usize| {
            let d = t + m - 1 - s;
            let (i, k) = (d / fast.num_baby_steps, d % fast.num_baby_steps);
            middle_products.entry(i, k).coefficient(m - 1 + s)
        };
        let x_dual_rows = map_indices(m, |s| {
            let y_dual = (0..n).map(|t| trace(s, t)).collect::<Vec<_>>();
            self.q.to_monomial(&y_dual)
        })?;

        self.x_dual_rows_to_array(&x_dual_rows)
    }
}
