//! Transposed multiplication and remainder.
//!
//! Multiplication by a fixed polynomial and reduction modulo a fixed monic
//! polynomial are linear maps. Their transposes act on linear functionals,
//! or, equivalently, on sequences: the transpose of reduction modulo `P`
//! extends the first `deg(P)` terms of a linear recurring sequence with
//! characteristic polynomial `P`.
//!
//! Every operation comes with a naïve counterpart that follows the
//! definition directly. Those are kept as oracles and for small inputs.

use itertools::Itertools;

use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

/// The degree of the polynomial a transposed multiplication multiplies by,
/// where the zero polynomial counts as degree 0.
fn multiplier_degree<R: Ring>(multiplier: &Polynomial<R>) -> usize {
    usize::try_from(multiplier.degree()).unwrap_or(0)
}

fn check_length<R>(sequence: &[R], expected: usize) -> Result<(), TellegenError> {
    if sequence.len() != expected {
        return Err(TellegenError::LengthMismatch {
            expected,
            actual: sequence.len(),
        });
    }

    Ok(())
}

/// Checks the arguments of a transposed remainder and returns the modulus'
/// degree.
fn check_remainder_arguments<R: Ring>(
    sequence: &[R],
    modulus: &Polynomial<R>,
    num_terms: usize,
) -> Result<usize, TellegenError> {
    let order = modulus.modulus_degree()?;
    if sequence.len() < order {
        return Err(TellegenError::InsufficientLength {
            minimum: order,
            actual: sequence.len(),
        });
    }
    if num_terms < order {
        return Err(TellegenError::TooFewTerms {
            requested: num_terms,
            order,
        });
    }

    Ok(order)
}

/// Transposed multiplication by `multiplier`, computed naïvely.
///
/// Multiplication by a polynomial `P` of degree `m` maps polynomials of degree
/// at most `n` to polynomials of degree at most `m + n`. This is the transpose
/// of that map: it takes `m + n + 1` coefficients `c` and returns the `n + 1`
/// values `Σₖ pₖ·c_{j+k}` for `j` in `0..=n`.
///
/// Takes time O(m·n). Prefer [`mul_t_mid`].
///
/// # Errors
///
/// Fails if `c` does not have exactly `m + n + 1` elements.
pub fn mul_t<R: Ring>(
    c: &[R],
    multiplier: &Polynomial<R>,
    n: usize,
) -> Result<Vec<R>, TellegenError> {
    let m = multiplier_degree(multiplier);
    check_length(c, m + n + 1)?;

    let p = multiplier.padded_coefficients(m + 1);
    let result = (0..=n)
        .map(|j| {
            p.iter()
                .zip(&c[j..])
                .fold(R::ZERO, |acc, (&p_k, &c_jk)| acc + p_k * c_jk)
        })
        .collect();

    Ok(result)
}

/// Transposed multiplication by `multiplier`, computed as a middle product.
///
/// Equivalent to [`mul_t`], but uses one fast polynomial multiplication: the
/// result consists of the coefficients `m..=m+n` of the product of the reversed
/// multiplier with the polynomial whose coefficients are `c`.
///
/// # Errors
///
/// Fails if `c` does not have exactly `m + n + 1` elements.
///
/// # Examples
///
/// ```
/// # use tellegen::prelude::*;
/// let p = Polynomial::<Zn<101>>::new(zn_vec![1, 2]);
/// let c = zn_vec![1, 2, 3, 4];
/// let expected = zn_vec![101; 5, 8, 11];
/// assert_eq!(expected, mul_t_mid(&c, &p, 2).unwrap());
/// ```
pub fn mul_t_mid<R: Ring>(
    c: &[R],
    multiplier: &Polynomial<R>,
    n: usize,
) -> Result<Vec<R>, TellegenError> {
    let m = multiplier_degree(multiplier);
    check_length(c, m + n + 1)?;

    let reversed_multiplier = multiplier.reverse_to_length(m + 1);
    let c = Polynomial::new(c.to_vec());
    let product = reversed_multiplier.mul_low(&c, m + n + 1);

    Ok(product.div_x_to_the_n(m).padded_coefficients(n + 1))
}

/// Transposed remainder modulo `modulus`.
///
/// Given (at least) the first `m` terms of a linear recurring sequence whose
/// characteristic polynomial is the monic `modulus` of degree `m`, returns the
/// first `num_terms` terms of that sequence. Equivalently: given the values
/// `ℓ(xⁱ)` for `i < m` of a linear functional ℓ on `R[x]/(modulus)`, returns
/// `ℓ(xⁱ mod modulus)` for `i < num_terms`.
///
/// Only the first `m` elements of `sequence` are read.
///
/// # Errors
///
/// Fails if the modulus is not monic or constant, if `sequence` has fewer than
/// `m` elements, or if `num_terms < m`.
pub fn rem_t<R: Ring>(
    sequence: &[R],
    modulus: &Polynomial<R>,
    num_terms: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = check_remainder_arguments(sequence, modulus, num_terms)?;
    let precision = num_terms - order;
    let alpha = modulus
        .reverse_to_length(order + 1)
        .formal_power_series_inverse_newton(precision)?;

    rem_t_pre(sequence, modulus, &alpha, num_terms)
}

/// Like [`rem_t`], but with a precomputed `alpha`, which must equal
/// `1 / reverse(modulus)` modulo `t^k` for some `k ≥ num_terms - m`.
///
/// This is not verified.
pub fn rem_t_pre<R: Ring>(
    sequence: &[R],
    modulus: &Polynomial<R>,
    alpha: &Polynomial<R>,
    num_terms: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = check_remainder_arguments(sequence, modulus, num_terms)?;
    let mut extension = sequence[..order].to_vec();
    if num_terms == order {
        return Ok(extension);
    }

    let precision = num_terms - order;
    let mut padded = extension.clone();
    padded.resize(num_terms, R::ZERO);
    let defect = mul_t_mid(&padded, modulus, precision - 1)?;
    let tail = alpha.mul_low(&Polynomial::new(defect), precision);

    extension.extend(tail.padded_coefficients(precision).into_iter().map(|t| -t));
    Ok(extension)
}

/// Like [`rem_t`], but by applying the linear recurrence term by term.
///
/// Takes time O(n·m), where `n` is `num_terms`.
pub fn naive_rem_t<R: Ring>(
    sequence: &[R],
    modulus: &Polynomial<R>,
    num_terms: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = check_remainder_arguments(sequence, modulus, num_terms)?;
    let recurrence = &modulus.coefficients[..order];

    let mut extension = sequence[..order].to_vec();
    for i in order..num_terms {
        let window = &extension[i - order..i];
        let next = recurrence
            .iter()
            .zip(window)
            .fold(R::ZERO, |acc, (&p_k, &s_k)| acc - p_k * s_k);
        extension.push(next);
    }

    Ok(extension)
}

/// Transposed modular multiplication.
///
/// The transpose of `f ↦ multiplier·f mod modulus`, restricted to `f` of
/// degree at most `n`. Given the values `ℓ(zⁱ)` for `i < deg(modulus)` of a
/// linear functional ℓ on `R[z]/(modulus)`, returns `ℓ(multiplier·zʲ mod
/// modulus)` for `j` in `0..=n`.
///
/// # Errors
///
/// Fails if the modulus is not monic or constant, or if `functional` does not
/// have exactly `deg(modulus)` elements.
pub fn mul_mod_t<R: Ring>(
    functional: &[R],
    multiplier: &Polynomial<R>,
    modulus: &Polynomial<R>,
    n: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = modulus.modulus_degree()?;
    let precision = (n + multiplier_degree(multiplier) + 1).saturating_sub(order);
    let alpha = modulus
        .reverse_to_length(order + 1)
        .formal_power_series_inverse_newton(precision)?;

    mul_mod_t_pre(functional, multiplier, modulus, &alpha, n)
}

/// Like [`mul_mod_t`], but with a precomputed `alpha`, which must equal
/// `1 / reverse(modulus)` modulo `t^k` for some `k ≥ n + deg(multiplier) + 1 -
/// deg(modulus)`.
///
/// This is not verified.
pub fn mul_mod_t_pre<R: Ring>(
    functional: &[R],
    multiplier: &Polynomial<R>,
    modulus: &Polynomial<R>,
    alpha: &Polynomial<R>,
    n: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = modulus.modulus_degree()?;
    check_length(functional, order)?;

    let num_terms = n + multiplier_degree(multiplier) + 1;
    let extension = if num_terms <= order {
        functional[..num_terms].to_vec()
    } else {
        rem_t_pre(functional, modulus, alpha, num_terms)?
    };

    mul_t_mid(&extension, multiplier, n)
}

/// Like [`mul_mod_t`], but by applying the functional to every product
/// `multiplier·zʲ mod modulus` explicitly.
pub fn naive_mul_mod_t<R: Ring>(
    functional: &[R],
    multiplier: &Polynomial<R>,
    modulus: &Polynomial<R>,
    n: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = modulus.modulus_degree()?;
    check_length(functional, order)?;

    let mut product = multiplier.reduce(modulus)?;
    let mut result = Vec::with_capacity(n + 1);
    for _ in 0..=n {
        let value = functional
            .iter()
            .zip_eq(product.padded_coefficients(order))
            .fold(R::ZERO, |acc, (&l, c)| acc + l * c);
        result.push(value);
        product = product.shift_coefficients(1).reduce(modulus)?;
    }

    Ok(result)
}

/// The values `ℓ(xⁱ mod modulus)` for `i < num_terms`, where ℓ is the linear
/// functional on `R[x]/(modulus)` given by the coefficient-wise dot product
/// with `coordinates`.
#[cfg(test)]
pub(crate) fn naive_functional_values<R: Ring>(
    coordinates: &[R],
    modulus: &Polynomial<R>,
    num_terms: usize,
) -> Result<Vec<R>, TellegenError> {
    let order = modulus.modulus_degree()?;
    check_length(coordinates, order)?;

    let mut power = Polynomial::<R>::from_constant(R::ONE);
    let mut values = Vec::with_capacity(num_terms);
    for _ in 0..num_terms {
        let value = power
            .padded_coefficients(order)
            .iter()
            .zip(coordinates)
            .fold(R::ZERO, |acc, (&c, &l)| acc + c * l);
        values.push(value);
        power = power.shift_coefficients(1).reduce(modulus)?;
    }

    Ok(values)
}
