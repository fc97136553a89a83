//! The bridge between two univariate quotient rings `R[x]/(P)`, `R[y]/(Q)` and
//! their composed product `R[z]/(P⊙Q)`, where `z` corresponds to `xy`.

use itertools::Itertools;

use crate::dual_basis::monomial_to_dual;
use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;
use crate::transposed::rem_t;

/// The first `num_terms` terms of the trace functional of a tensor product.
///
/// Given the dual coordinates `Tr(A·xⁱ)` of some `A` in `R[x]/(p)` and
/// `Tr(B·yⁱ)` of some `B` in `R[y]/(q)`, returns the terms
/// `Tr(A·xⁱ)·Tr(B·yⁱ) = Tr((A⊗B)·(xy)ⁱ)` for `i < num_terms`: the dual
/// coordinates of the functional `F ↦ Tr((A⊗B)·F(xy))`.
///
/// # Errors
///
/// Fails if either modulus is not monic or constant, or if the number of
/// dual coordinates differs from the degree of the corresponding modulus.
pub fn embed<R: Ring>(
    dual_p: &[R],
    p: &Polynomial<R>,
    dual_q: &[R],
    q: &Polynomial<R>,
    num_terms: usize,
) -> Result<Vec<R>, TellegenError> {
    let m = p.modulus_degree()?;
    let n = q.modulus_degree()?;
    check_length(dual_p, m)?;
    check_length(dual_q, n)?;

    // the transposed remainder can not produce fewer terms than the order
    let num_extended_terms = num_terms.max(m).max(n);
    let extended_p = rem_t(dual_p, p, num_extended_terms)?;
    let extended_q = rem_t(dual_q, q, num_extended_terms)?;

    let embedding = extended_p
        .into_iter()
        .zip_eq(extended_q)
        .take(num_terms)
        .map(|(a, b)| a * b)
        .collect();

    Ok(embedding)
}

/// Like [`embed`], with `deg(p)·deg(q)` terms, the degree of the composed
/// product.
pub fn embed_default<R: Ring>(
    dual_p: &[R],
    p: &Polynomial<R>,
    dual_q: &[R],
    q: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    embed(dual_p, p, dual_q, q, dual_p.len() * dual_q.len())
}

/// The projection of `R[z]/(p⊙q)` onto `R[x]/(p)` along `R[y]/(q)`.
///
/// Given the monomial coordinates of some `F` in `R[z]/(p⊙q)`, returns the
/// monomial coordinates of the partial trace `Σⱼ fⱼ·Tr(yʲ)·xʲ mod p` of
/// `F(xy)`. In particular, if `F(xy) = A(x)`, the projection is `deg(q)·A`.
///
/// # Errors
///
/// Fails if either modulus is not monic or constant, or if the number of
/// coordinates is not `deg(p)·deg(q)`.
pub fn project<R: Ring>(
    coordinates: &[R],
    p: &Polynomial<R>,
    q: &Polynomial<R>,
) -> Result<Vec<R>, TellegenError> {
    let m = p.modulus_degree()?;
    let n = q.modulus_degree()?;
    check_length(coordinates, m * n)?;

    let mut one = vec![R::ZERO; n];
    one[0] = R::ONE;
    let trace_of_one = monomial_to_dual(&one, q)?;
    let traces = rem_t(&trace_of_one, q, m * n)?;

    let partial_trace = coordinates
        .iter()
        .zip_eq(traces)
        .map(|(&f, trace)| f * trace)
        .collect_vec();
    let projection = Polynomial::new(partial_trace).reduce(p)?;

    Ok(projection.padded_coefficients(m))
}

fn check_length<R>(coordinates: &[R], expected: usize) -> Result<(), TellegenError> {
    if coordinates.len() != expected {
        return Err(TellegenError::LengthMismatch {
            expected,
            actual: coordinates.len(),
        });
    }

    Ok(())
}
