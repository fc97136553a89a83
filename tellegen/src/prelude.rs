pub use crate::berlekamp_massey::berlekamp_massey;
pub use crate::composed_product::composed_product;
pub use crate::config::set_fast_inverse_isomorphism_cutoff;
pub use crate::config::set_fast_isomorphism_cutoff;
pub use crate::config::set_parallelization_cutoff;
pub use crate::dual_basis::DualBasis;
pub use crate::dual_basis::dual_to_monomial;
pub use crate::dual_basis::dual_to_monomial_pre;
pub use crate::dual_basis::monomial_to_dual;
pub use crate::dual_basis::monomial_to_dual_pre;
pub use crate::embedding::embed;
pub use crate::embedding::embed_default;
pub use crate::embedding::project;
pub use crate::error::TellegenError;
pub use crate::isomorphism::Isomorphism;
pub use crate::isomorphism::TensorArray;
pub use crate::isomorphism::inverse_phi1;
pub use crate::isomorphism::inverse_phi2;
pub use crate::isomorphism::phi1;
pub use crate::isomorphism::phi2;
pub use crate::math::matrix::Matrix;
pub use crate::math::polynomial::Polynomial;
pub use crate::math::polynomial_matrix::PolynomialMatrix;
pub use crate::math::traits::Inverse;
pub use crate::math::traits::Ring;
pub use crate::math::zn::Zn;
pub use crate::transposed::mul_mod_t;
pub use crate::transposed::mul_mod_t_pre;
pub use crate::transposed::mul_t;
pub use crate::transposed::mul_t_mid;
pub use crate::transposed::naive_mul_mod_t;
pub use crate::transposed::naive_rem_t;
pub use crate::transposed::rem_t;
pub use crate::transposed::rem_t_pre;
pub use crate::zn_vec;
