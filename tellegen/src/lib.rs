#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![deny(clippy::shadow_unrelated)]
//! Transposed algorithms for univariate polynomials over commutative rings.
//!
//! The central objects are quotient rings `R[x]/(P)` for monic, squarefree
//! `P`, together with their dual bases with respect to the trace functional.
//! Linear functionals on such rings are handled by transposed versions of
//! polynomial multiplication and remainder. On top of those, this crate
//! computes composed products `P⊙Q`, whose roots are the products of the roots
//! of `P` and `Q`, and the isomorphism between `R[x,y]/(P,Q)` and
//! `R[z]/(P⊙Q)` that maps `z` to `xy`.
//!
//! ```
//! # use tellegen::prelude::*;
//! let p = Polynomial::<Zn<29>>::new(zn_vec![1, 0, 1]);
//! let q = Polynomial::<Zn<29>>::new(zn_vec![2, 1, 1]);
//! let isomorphism = Isomorphism::new(p, q).unwrap();
//!
//! let xy = vec![zn_vec![29; 0, 0], zn_vec![29; 0, 1]];
//! let z = isomorphism.phi(&xy).unwrap();
//! assert_eq!(zn_vec![29; 0, 1, 0, 0], z);
//! assert_eq!(xy, isomorphism.inverse_phi(&z).unwrap());
//! ```

pub mod berlekamp_massey;
pub mod composed_product;
pub mod config;
pub mod dual_basis;
pub mod embedding;
pub mod error;
pub mod isomorphism;
pub mod math;
pub mod prelude;
pub mod transposed;
