//! Minimal polynomials of linear recurring sequences.

use num_traits::One;
use num_traits::Zero;

use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

/// The monic minimal polynomial of a linear recurring sequence of order at
/// most `order`, given at least `2·order` of its terms.
///
/// Runs the extended Euclidean algorithm on `x^(2·order)` and the reversed
/// first `2·order` terms, and stops as soon as the remainder's degree drops
/// below `order`. The Bézout cofactor of the reversed terms at that point,
/// made monic, is the minimal polynomial.
///
/// Terms beyond the first `2·order` are ignored.
///
/// # Errors
///
/// Fails if fewer than `2·order` terms are given, or if a leading
/// coefficient encountered along the way is not a unit. The latter is
/// impossible over a field.
///
/// # Examples
///
/// ```
/// # use tellegen::prelude::*;
/// let fibonacci = zn_vec![11; 1, 1, 2, 3];
/// let minimal_polynomial = berlekamp_massey(&fibonacci, 2).unwrap();
/// assert_eq!(Polynomial::new(zn_vec![11; -1, -1, 1]), minimal_polynomial);
/// ```
pub fn berlekamp_massey<R: Ring>(
    sequence: &[R],
    order: usize,
) -> Result<Polynomial<R>, TellegenError> {
    let num_terms = 2 * order;
    if sequence.len() < num_terms {
        return Err(TellegenError::InsufficientLength {
            minimum: num_terms,
            actual: sequence.len(),
        });
    }

    let order = order as isize;
    let mut previous_remainder = Polynomial::x_to_the(num_terms);
    let mut remainder =
        Polynomial::new(sequence[..num_terms].to_vec()).reverse_to_length(num_terms);
    let mut previous_cofactor = Polynomial::zero();
    let mut cofactor = Polynomial::one();

    while remainder.degree() >= order {
        let (quotient, next_remainder) = previous_remainder.divide(&remainder)?;
        let next_cofactor = previous_cofactor - quotient.multiply(&cofactor);

        previous_remainder = remainder;
        remainder = next_remainder;
        previous_cofactor = cofactor;
        cofactor = next_cofactor;
    }

    let leading_coefficient_inverse = cofactor
        .leading_coefficient()
        .and_then(|lc| lc.try_inverse())
        .ok_or(TellegenError::NotInvertible)?;
    cofactor.scalar_mul_mut(leading_coefficient_inverse);
    cofactor.normalize();

    Ok(cofactor)
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
    use crate::transposed::naive_rem_t;
    use crate::zn_vec;

    type F = Zn<1_000_000_007>;

    #[test]
    fn minimal_polynomial_of_fibonacci_sequence() {
        let fibonacci = zn_vec![11; 1, 1, 2, 3];
        let expected = Polynomial::new(zn_vec![10, 10, 1]);
        assert_eq!(expected, berlekamp_massey(&fibonacci, 2).unwrap());
    }

    #[test]
    fn surplus_terms_are_ignored() {
        let fibonacci = zn_vec![11; 1, 1, 2, 3, 42, 42, 42];
        let expected = Polynomial::new(zn_vec![10, 10, 1]);
        assert_eq!(expected, berlekamp_massey(&fibonacci, 2).unwrap());
    }

    #[test]
    fn geometric_sequence_has_linear_minimal_polynomial() {
        let powers_of_three: Vec<F> = zn_vec![1, 3, 9, 27, 81, 243];
        let expected = Polynomial::new(zn_vec![-3, 1]);
        assert_eq!(expected, berlekamp_massey(&powers_of_three, 3).unwrap());
    }

    #[test]
    fn too_few_terms_are_rejected() {
        let sequence: Vec<F> = zn_vec![1, 1, 2];
        assert_eq!(
            Err(TellegenError::InsufficientLength {
                minimum: 4,
                actual: 3
            }),
            berlekamp_massey(&sequence, 2)
        );
    }

    #[test]
    fn zero_divisors_are_detected() {
        // over ℤ/4, the reversed terms have leading coefficient 2
        let sequence = zn_vec![4; 2, 1, 1, 1];
        assert_eq!(
            Err(TellegenError::NotInvertible),
            berlekamp_massey(&sequence, 2)
        );
    }

    #[proptest]
    fn minimal_polynomial_of_generic_recurrence_is_recovered(
        #[strategy(1usize..20)] order: usize,
        #[strategy(vec(arb::<F>(), #order))] recurrence: Vec<F>,
        #[strategy(vec(arb::<F>(), #order))] initial_terms: Vec<F>,
    ) {
        let mut coefficients = recurrence;
        coefficients.push(F::ONE);
        let characteristic_polynomial = Polynomial::new(coefficients);
        let sequence = naive_rem_t(&initial_terms, &characteristic_polynomial, 2 * order)?;

        // The minimal polynomial divides the characteristic polynomial, and
        // annihilates the sequence.
        let minimal_polynomial = berlekamp_massey(&sequence, order)?;
        prop_assert!(minimal_polynomial.is_monic());
        let remainder = characteristic_polynomial.reduce(&minimal_polynomial)?;
        prop_assert!(remainder.is_zero());

        let minimal_order = minimal_polynomial.degree() as usize;
        let extension = naive_rem_t(&sequence, &minimal_polynomial, 2 * order)?;
        prop_assert_eq!(&sequence, &extension);
        prop_assert!(minimal_order <= order);
    }
}
