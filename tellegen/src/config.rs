//! This module contains various configuration options. In general, the
//! configuration options impact performance only. The default configuration is
//! sane and should provide good performance for most users.
//!
//! Most configuration options can also be set via environment variables.
//! Generally, the environment variables take precedence over the options set
//! in this module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub fast_isomorphism_cutoff: FastIsomorphismCutoff,
    pub fast_inverse_isomorphism_cutoff: FastInverseIsomorphismCutoff,
    pub parallelization_cutoff: ParallelizationCutoff,
}

impl Config {
    fn new() -> Self {
        Self {
            fast_isomorphism_cutoff: FastIsomorphismCutoff::new(None),
            fast_inverse_isomorphism_cutoff: FastInverseIsomorphismCutoff::new(None),
            parallelization_cutoff: ParallelizationCutoff::new(None),
        }
    }
}

/// Reads a `usize` from the environment variable `env_var`, falling back to
/// `config_value`, then to `default`. The result is never below `minimum`.
fn resolve(env_var: &str, config_value: Option<usize>, default: usize, minimum: usize) -> usize {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.parse().ok())
        .or(config_value)
        .unwrap_or(default)
        .max(minimum)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct FastIsomorphismCutoff(usize);

impl FastIsomorphismCutoff {
    const ENV_VAR: &'static str = "TELLEGEN_FAST_ISOMORPHISM_CUTOFF";
    const DEFAULT: usize = 256;
    const MINIMUM: usize = 1;

    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<usize>) -> Self {
        Self(resolve(
            Self::ENV_VAR,
            config_value,
            Self::DEFAULT,
            Self::MINIMUM,
        ))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct FastInverseIsomorphismCutoff(usize);

impl FastInverseIsomorphismCutoff {
    const ENV_VAR: &'static str = "TELLEGEN_FAST_INVERSE_ISOMORPHISM_CUTOFF";
    const DEFAULT: usize = usize::MAX;
    const MINIMUM: usize = 1;

    fn new(config_value: Option<usize>) -> Self {
        Self(resolve(
            Self::ENV_VAR,
            config_value,
            Self::DEFAULT,
            Self::MINIMUM,
        ))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct ParallelizationCutoff(usize);

impl ParallelizationCutoff {
    const ENV_VAR: &'static str = "TELLEGEN_PARALLELIZATION_CUTOFF";
    const DEFAULT: usize = 8;
    const MINIMUM: usize = 1;

    fn new(config_value: Option<usize>) -> Self {
        Self(resolve(
            Self::ENV_VAR,
            config_value,
            Self::DEFAULT,
            Self::MINIMUM,
        ))
    }
}

/// Sets the product of degrees `m·n` from which on the isomorphism from the
/// tensor product to the composed product uses the baby-step giant-step
/// algorithm instead of the naïve one.
///
/// The naïve algorithm is quadratic, but has small constants and works for
/// all inputs. The fast algorithm requires the second modulus to have a
/// non-zero constant term; if it does not, the naïve algorithm is used
/// regardless of this cutoff.
///
/// Can also be set via the environment variable
/// `TELLEGEN_FAST_ISOMORPHISM_CUTOFF`. The environment variable has higher
/// precedence than this function.
///
/// The default is 256. The minimum is always 1.
pub fn set_fast_isomorphism_cutoff(cutoff: usize) {
    let cutoff = FastIsomorphismCutoff::new(Some(cutoff));
    CONFIG.with(|c| c.borrow_mut().fast_isomorphism_cutoff = cutoff);
}

pub(crate) fn fast_isomorphism_cutoff() -> usize {
    CONFIG.with(|c| c.borrow().fast_isomorphism_cutoff).0
}

/// Like [`set_fast_isomorphism_cutoff`], but for the inverse isomorphism.
///
/// The giant steps of the fast inverse are transposed modular multiplications
/// modulo the composed product, which cost several times as much as the
/// reductions modulo the second modulus that the naïve inverse performs. By
/// default, the naïve inverse is always used.
///
/// Can also be set via the environment variable
/// `TELLEGEN_FAST_INVERSE_ISOMORPHISM_CUTOFF`. The environment variable has
/// higher precedence than this function.
///
/// The default is [`usize::MAX`]. The minimum is always 1.
pub fn set_fast_inverse_isomorphism_cutoff(cutoff: usize) {
    let cutoff = FastInverseIsomorphismCutoff::new(Some(cutoff));
    CONFIG.with(|c| c.borrow_mut().fast_inverse_isomorphism_cutoff = cutoff);
}

pub(crate) fn fast_inverse_isomorphism_cutoff() -> usize {
    CONFIG.with(|c| c.borrow().fast_inverse_isomorphism_cutoff).0
}

/// Sets the number of independent rows from which on row-wise work, like
/// matrix products or the per-row transposed remainders of the naïve
/// isomorphisms, is distributed over the [rayon] thread pool.
///
/// Can also be set via the environment variable
/// `TELLEGEN_PARALLELIZATION_CUTOFF`. The environment variable has higher
/// precedence than this function.
///
/// The default is 8. The minimum is always 1.
pub fn set_parallelization_cutoff(cutoff: usize) {
    let cutoff = ParallelizationCutoff::new(Some(cutoff));
    CONFIG.with(|c| c.borrow_mut().parallelization_cutoff = cutoff);
}

pub(crate) fn parallelization_cutoff() -> usize {
    CONFIG.with(|c| c.borrow().parallelization_cutoff).0
}
