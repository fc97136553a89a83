//! The composed product `P⊙Q`, whose roots are the pairwise products of the
//! roots of `P` and `Q`.

use crate::berlekamp_massey::berlekamp_massey;
use crate::dual_basis::monomial_to_dual;
use crate::embedding::embed;
use crate::error::TellegenError;
use crate::math::polynomial::Polynomial;
use crate::math::traits::Ring;

/// The coordinates of `1` in a quotient ring of the given degree.
pub(crate) fn unit<R: Ring>(degree: usize) -> Vec<R> {
    let mut one = vec![R::ZERO; degree];
    if let Some(constant) = one.first_mut() {
        *constant = R::ONE;
    }

    one
}

/// The composed product `p⊙q`: the monic polynomial of degree `deg(p)·deg(q)`
/// whose roots, over a field where `p` and `q` split, are exactly the products
/// `αβ` of a root `α` of `p` with a root `β` of `q`.
///
/// The traces `Tr(xⁱ)·Tr(yⁱ)` are the power sums of these products, so they
/// form a linear recurring sequence with minimal polynomial `p⊙q`, which
/// [Berlekamp–Massey](berlekamp_massey) recovers from its first
/// `2·deg(p)·deg(q)` terms.
///
/// # Errors
///
/// Fails if `p` or `q` is not monic, constant, or not squarefree. Also fails
/// with [`TellegenError::NotSquarefree`] if the products of roots are not
/// pairwise distinct: then the composed product has a repeated root and can
/// not be recovered from its power sums.
///
/// # Examples
///
/// ```
/// # use tellegen::prelude::*;
/// // (x - 2)⊙(x - 3) = z - 6
/// let p = Polynomial::<Zn<101>>::new(zn_vec![-2, 1]);
/// let q = Polynomial::<Zn<101>>::new(zn_vec![-3, 1]);
/// let r = composed_product(&p, &q).unwrap();
/// assert_eq!(Polynomial::new(zn_vec![101; -6, 1]), r);
/// ```
pub fn composed_product<R: Ring>(
    p: &Polynomial<R>,
    q: &Polynomial<R>,
) -> Result<Polynomial<R>, TellegenError> {
    let m = p.modulus_degree()?;
    let n = q.modulus_degree()?;
    for modulus in [p, q] {
        if !modulus.is_squarefree()? {
            return Err(TellegenError::NotSquarefree);
        }
    }

    log::debug!("computing composed product of degree {m}·{n}");
    let trace_p = monomial_to_dual(&unit(m), p)?;
    let trace_q = monomial_to_dual(&unit(n), q)?;
    let power_sums = embed(&trace_p, p, &trace_q, q, 2 * m * n)?;
    let composed_product = berlekamp_massey(&power_sums, m * n)?;

    if composed_product.degree() != (m * n) as isize {
        log::debug!(
            "products of roots are not distinct: minimal polynomial has degree {}",
            composed_product.degree()
        );
        return Err(TellegenError::NotSquarefree);
    }

    Ok(composed_product)
}
