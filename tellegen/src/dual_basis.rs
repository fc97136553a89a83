//! Change of basis between the monomial basis of `R[x]/(P)` and its dual.
//!
//! The trace pairing `(A, B) ↦ Tr(A·B)` identifies `R[x]/(P)` with its dual
//! space whenever `P` is squarefree. The dual coordinates of `A` are
//! `Tr(A·xⁱ)` for `i < deg(P)`, _i.e._, the first `deg(P)` terms of the
//! linear recurring sequence `Tr(A·xⁱ)`, whose generating function is
//! `reverse(P′·A mod P) / reverse(P)`.

use num_traits::One;
use num_traits::Zero;

use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;
use crate::transposed::mul_mod_t;
use crate::transposed::mul_mod_t_pre;
use crate::transposed::rem_t_pre;

fn check_coordinates<R>(coordinates: &[R], degree: usize) -> Result<(), TellegenError> {
    if coordinates.len() != degree {
        return Err(TellegenError::LengthMismatch {
            expected: degree,
            actual: coordinates.len(),
        });
    }

    Ok(())
}

/// The dual coordinates of the element of `R[x]/(modulus)` with the given
/// monomial coordinates.
///
/// # Errors
///
/// Fails if the modulus is not monic or constant, or if the number of
/// coordinates is not the modulus' degree.
///
/// # Examples
///
/// ```
/// # use tellegen::prelude::*;
/// // x² + 1 over ℤ/5 has roots 2 and 3. The trace of 1 is 2, that of x is 5 = 0.
/// let modulus = Polynomial::<Zn<5>>::new(zn_vec![1, 0, 1]);
/// let dual = monomial_to_dual(&zn_vec![1, 0], &modulus).unwrap();
/// assert_eq!(zn_vec![5; 2, 0], dual);
/// ```
pub fn monomial_to_dual<R: Ring>(
    coordinates: &[R],
    modulus: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    let degree = modulus.modulus_degree()?;
    let reversed_modulus_inverse = modulus
        .reverse_to_length(degree + 1)
        .formal_power_series_inverse_newton(degree)?;

    monomial_to_dual_pre(coordinates, modulus, &reversed_modulus_inverse)
}

/// Like [`monomial_to_dual`], but with a precomputed inverse of the reversed
/// modulus, which must equal `1 / reverse(modulus)` modulo `t^k` for some
/// `k ≥ deg(modulus)`.
///
/// This is not verified.
pub fn monomial_to_dual_pre<R: Ring>(
    coordinates: &[R],
    modulus: &Polynomial<R>,
    reversed_modulus_inverse: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    let degree = modulus.modulus_degree()?;
    check_coordinates(coordinates, degree)?;

    let element = Polynomial::new(coordinates.to_vec());
    let numerator = modulus
        .formal_derivative()
        .multiply_mod(&element, modulus)?
        .reverse_to_length(degree);
    let dual = numerator.mul_low(reversed_modulus_inverse, degree);

    Ok(dual.padded_coefficients(degree))
}

/// The monomial coordinates of the element of `R[x]/(modulus)` with the given
/// dual coordinates. The inverse of [`monomial_to_dual`].
///
/// # Errors
///
/// Fails if the modulus is not monic or constant, if the number of
/// coordinates is not the modulus' degree, or if the modulus' formal
/// derivative is not invertible modulo the modulus, which is the case if
/// the modulus is not squarefree.
pub fn dual_to_monomial<R: Ring>(
    coordinates: &[R],
    modulus: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    modulus.modulus_degree()?;
    let derivative_inverse = modulus.formal_derivative().inverse_mod(modulus)?;

    dual_to_monomial_pre(coordinates, modulus, &derivative_inverse)
}

/// Like [`dual_to_monomial`], but with the precomputed inverse of the
/// modulus' formal derivative modulo the modulus.
///
/// This is not verified.
pub fn dual_to_monomial_pre<R: Ring>(
    coordinates: &[R],
    modulus: &Polynomial<R>,
    derivative_inverse: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    let degree = modulus.modulus_degree()?;
    check_coordinates(coordinates, degree)?;

    let dual = Polynomial::new(coordinates.to_vec());
    let numerator = modulus
        .reverse_to_length(degree + 1)
        .mul_low(&dual, degree)
        .reverse_to_length(degree);
    let element = numerator.multiply_mod(derivative_inverse, modulus)?;

    Ok(element.padded_coefficients(degree))
}

/// A squarefree monic modulus together with everything needed to convert
/// between monomial and dual coordinates without further inversions.
///
/// Built once per modulus, then shared by reference.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DualBasis<R: Ring> {
    modulus: Polynomial<R>,
    degree: usize,

    /// `1 / reverse(modulus)` modulo `t^degree`
    reversed_modulus_inverse: Polynomial<R>,

    /// `1 / modulus′` modulo the modulus
    derivative_inverse: Polynomial<R>,
}

impl<R: Ring> DualBasis<R> {
    /// # Errors
    ///
    /// Fails if the modulus is not monic, is constant, or is not squarefree.
    pub fn new(modulus: Polynomial<R>) -> Result<Self, TellegenError> {
        let degree = modulus.modulus_degree()?;
        if !modulus.is_squarefree()? {
            return Err(TellegenError::NotSquarefree);
        }

        let reversed_modulus_inverse = modulus
            .reverse_to_length(degree + 1)
            .formal_power_series_inverse_newton(degree)?;
        let derivative_inverse = modulus.formal_derivative().inverse_mod(&modulus)?;

        Ok(Self {
            modulus,
            degree,
            reversed_modulus_inverse,
            derivative_inverse,
        })
    }

    pub fn modulus(&self) -> &Polynomial<R> {
        &self.modulus
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// See [`monomial_to_dual`].
    pub fn to_dual(&self, coordinates: &[R]) -> Result<Vec<R>, TellegenError> {
        monomial_to_dual_pre(coordinates, &self.modulus, &self.reversed_modulus_inverse)
    }

    /// See [`dual_to_monomial`].
    pub fn to_monomial(&self, coordinates: &[R]) -> Result<Vec<R>, TellegenError> {
        dual_to_monomial_pre(coordinates, &self.modulus, &self.derivative_inverse)
    }

    /// The monomial coordinates of `poly mod modulus`.
    pub fn coordinates_of(&self, poly: &Polynomial<R>) -> Result<Vec<R>, TellegenError> {
        Ok(poly.reduce(&self.modulus)?.padded_coefficients(self.degree))
    }

    /// The dual coordinates of `poly mod modulus`.
    pub fn dual_of(&self, poly: &Polynomial<R>) -> Result<Vec<R>, TellegenError> {
        self.to_dual(&self.coordinates_of(poly)?)
    }

    /// Extends dual coordinates `Tr(A·xⁱ)`, `i < deg(modulus)`, to the first
    /// `num_terms` terms of that sequence. See [`rem_t`](crate::transposed::rem_t).
    pub fn extend(&self, dual: &[R], num_terms: usize) -> Result<Vec<R>, TellegenError> {
        let precision = num_terms.saturating_sub(self.degree);
        if precision <= self.degree {
            return rem_t_pre(dual, &self.modulus, &self.reversed_modulus_inverse, num_terms);
        }

        let alpha = self
            .modulus
            .reverse_to_length(self.degree + 1)
            .formal_power_series_inverse_newton(precision)?;
        rem_t_pre(dual, &self.modulus, &alpha, num_terms)
    }

    /// `poly mod modulus`, with the quotient computed as a power series
    /// product with the stored inverse of the reversed modulus. Falls back to
    /// [long division](Polynomial::reduce) if that inverse is not precise
    /// enough, _i.e._, if `deg(poly) ≥ 2·deg(modulus)`.
    pub fn reduce(&self, poly: &Polynomial<R>) -> Result<Polynomial<R>, TellegenError> {
        let Ok(degree) = usize::try_from(poly.degree()) else {
            return Ok(Polynomial::zero());
        };
        if degree < self.degree {
            return Ok(poly.clone());
        }

        let quotient_len = degree - self.degree + 1;
        if quotient_len > self.degree {
            return poly.reduce(&self.modulus);
        }

        let reversed_quotient = poly
            .reverse_to_length(degree + 1)
            .mul_low(&self.reversed_modulus_inverse, quotient_len);
        let quotient = reversed_quotient.reverse_to_length(quotient_len);
        let mut remainder =
            poly.mod_x_to_the_n(self.degree) - quotient.mul_low(&self.modulus, self.degree);
        remainder.normalize();

        Ok(remainder)
    }

    /// `lhs · rhs mod modulus`. See [`reduce`](Self::reduce).
    pub fn multiply_mod(
        &self,
        lhs: &Polynomial<R>,
        rhs: &Polynomial<R>,
    ) -> Result<Polynomial<R>, TellegenError> {
        self.reduce(&lhs.multiply(rhs))
    }

    /// See [`mul_mod_t`]. Uses the stored inverse of the reversed modulus
    /// whenever it is precise enough, which is the case for multipliers of
    /// degree less than the modulus' and `n < deg(modulus)`.
    pub fn mul_mod_t(
        &self,
        functional: &[R],
        multiplier: &Polynomial<R>,
        n: usize,
    ) -> Result<Vec<R>, TellegenError> {
        let multiplier_degree = usize::try_from(multiplier.degree()).unwrap_or(0);
        let precision = (n + multiplier_degree + 1).saturating_sub(self.degree);
        if precision > self.degree {
            return mul_mod_t(functional, multiplier, &self.modulus, n);
        }

        let alpha = &self.reversed_modulus_inverse;
        mul_mod_t_pre(functional, multiplier, &self.modulus, alpha, n)
    }

    /// The traces `Tr(xⁱ)` for `i < num_terms`.
    pub fn trace_vector(&self, num_terms: usize) -> Result<Vec<R>, TellegenError> {
        let trace_of_one = self.dual_of(&Polynomial::one())?;
        self.extend(&trace_of_one, num_terms.max(self.degree))
            .map(|traces| traces[..num_terms].to_vec())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use num_traits::ConstOne;
    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;
    use test_strategy::proptest;

    use super::*;
    use crate::math::zn::Zn;
    use crate::transposed::naive_mul_mod_t;
    use crate::transposed::naive_rem_t;
    use crate::zn_vec;

    type F = Zn<1_000_000_007>;

    fn squarefree_monic_polynomial(degree: usize) -> impl Strategy<Value = Polynomial<F>> {
        vec(arb::<F>(), degree)
            .prop_map(|mut coefficients| {
                coefficients.push(F::ONE);
                Polynomial::new(coefficients)
            })
            .prop_filter("modulus must be squarefree", |p| {
                p.is_squarefree().unwrap_or(false)
            })
    }

    /// The trace of multiplication by `element` in `R[x]/(modulus)`.
    fn trace(element: &Polynomial<F>, modulus: &Polynomial<F>) -> F {
        let degree = modulus.modulus_degree().unwrap();
        (0..degree)
            .map(|k| {
                element
                    .multiply_mod(&Polynomial::x_to_the(k), modulus)
                    .unwrap()
                    .coefficient(k)
            })
            .sum()
    }

    #[test]
    fn dual_basis_of_linear_modulus_over_f2() {
        let modulus = Polynomial::<Zn<2>>::new(zn_vec![1, 1]);
        let one: Vec<Zn<2>> = zn_vec![1];
        assert_eq!(one, monomial_to_dual(&one, &modulus).unwrap());
        assert_eq!(one, dual_to_monomial(&one, &modulus).unwrap());
    }

    #[proptest]
    fn dual_coordinates_are_traces(
        #[strategy(1usize..12)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), #degree))] coordinates: Vec<F>,
    ) {
        let element = Polynomial::new(coordinates.clone());
        let traces = (0..degree)
            .map(|i| trace(&element.multiply(&Polynomial::x_to_the(i)), &modulus))
            .collect::<Vec<_>>();
        prop_assert_eq!(traces, monomial_to_dual(&coordinates, &modulus)?);
    }

    #[proptest]
    fn converting_to_dual_and_back_is_identity(
        #[strategy(1usize..40)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), #degree))] coordinates: Vec<F>,
    ) {
        let dual = monomial_to_dual(&coordinates, &modulus)?;
        prop_assert_eq!(&coordinates, &dual_to_monomial(&dual, &modulus)?);

        let monomial = dual_to_monomial(&coordinates, &modulus)?;
        prop_assert_eq!(coordinates, monomial_to_dual(&monomial, &modulus)?);
    }

    #[proptest]
    fn precomputed_context_agrees_with_free_functions(
        #[strategy(1usize..20)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), #degree))] coordinates: Vec<F>,
    ) {
        let basis = DualBasis::new(modulus.clone())?;
        prop_assert_eq!(
            monomial_to_dual(&coordinates, &modulus)?,
            basis.to_dual(&coordinates)?
        );
        prop_assert_eq!(
            dual_to_monomial(&coordinates, &modulus)?,
            basis.to_monomial(&coordinates)?
        );
    }

    #[proptest]
    fn extension_agrees_with_recurrence(
        #[strategy(1usize..10)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), #degree))] dual: Vec<F>,
        #[strategy(0usize..50)] extra_terms: usize,
    ) {
        let basis = DualBasis::new(modulus.clone())?;
        let num_terms = degree + extra_terms;
        prop_assert_eq!(
            naive_rem_t(&dual, &modulus, num_terms)?,
            basis.extend(&dual, num_terms)?
        );
    }

    #[proptest]
    fn reduction_agrees_with_long_division(
        #[strategy(1usize..20)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), 0..3 * #degree))] coefficients: Vec<F>,
    ) {
        let basis = DualBasis::new(modulus.clone())?;
        let poly = Polynomial::new(coefficients);
        prop_assert_eq!(poly.reduce(&modulus)?, basis.reduce(&poly)?);
    }

    #[proptest]
    fn modular_multiplication_agrees_with_long_division(
        #[strategy(1usize..20)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), #degree))] lhs: Vec<F>,
        #[strategy(vec(arb(), #degree))] rhs: Vec<F>,
    ) {
        let basis = DualBasis::new(modulus.clone())?;
        let (lhs, rhs) = (Polynomial::new(lhs), Polynomial::new(rhs));
        prop_assert_eq!(
            lhs.multiply_mod(&rhs, &modulus)?,
            basis.multiply_mod(&lhs, &rhs)?
        );
    }

    #[proptest]
    fn transposed_modular_multiplication_agrees_with_definition(
        #[strategy(1usize..15)] degree: usize,
        #[strategy(squarefree_monic_polynomial(#degree))] modulus: Polynomial<F>,
        #[strategy(vec(arb(), 0..2 * #degree))] multiplier: Vec<F>,
        #[strategy(vec(arb(), #degree))] functional: Vec<F>,
        #[strategy(0usize..30)] n: usize,
    ) {
        let basis = DualBasis::new(modulus.clone())?;
        let multiplier = Polynomial::new(multiplier);
        prop_assert_eq!(
            naive_mul_mod_t(&functional, &multiplier, &modulus, n)?,
            basis.mul_mod_t(&functional, &multiplier, n)?
        );
    }

    #[test]
    fn trace_vector_consists_of_power_sums() {
        // (x - 1)(x - 2)(x - 3)
        let modulus = Polynomial::new(zn_vec![-6, 11, -6, 1]);
        let basis = DualBasis::<F>::new(modulus).unwrap();
        let power_sums = (0..10)
            .map(|i| F::from(1_u64) + F::from(2_u64).mod_pow(i) + F::from(3_u64).mod_pow(i))
            .collect::<Vec<_>>();
        assert_eq!(power_sums, basis.trace_vector(10).unwrap());
        assert_eq!(power_sums[..2], basis.trace_vector(2).unwrap());
    }

    #[test]
    fn context_rejects_unsuitable_moduli() {
        let not_monic = Polynomial::<F>::new(zn_vec![1, 2]);
        assert_eq!(Err(TellegenError::NotMonic), DualBasis::new(not_monic));

        let constant = Polynomial::<F>::new(zn_vec![1]);
        assert_eq!(
            Err(TellegenError::ZeroDegreeModulus),
            DualBasis::new(constant)
        );

        // (x + 1)²
        let square = Polynomial::<F>::new(zn_vec![1, 2, 1]);
        assert_eq!(Err(TellegenError::NotSquarefree), DualBasis::new(square));
    }

    #[test]
    fn dual_to_monomial_needs_invertible_derivative() {
        // over ℤ/4, the derivative 2x of x² + 1 is a zero divisor
        let modulus = Polynomial::<Zn<4>>::new(zn_vec![1, 0, 1]);
        let dual: Vec<Zn<4>> = zn_vec![2, 0];
        assert_eq!(
            Err(TellegenError::NotInvertible),
            dual_to_monomial(&dual, &modulus)
        );
    }

    #[test]
    fn conversions_reject_wrong_number_of_coordinates() {
        let modulus = Polynomial::<F>::new(zn_vec![1, 0, 1]);
        let coordinates: Vec<F> = zn_vec![1, 2, 3];
        let err = TellegenError::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(Err(err.clone()), monomial_to_dual(&coordinates, &modulus));
        assert_eq!(Err(err), dual_to_monomial(&coordinates, &modulus));
    }
}
