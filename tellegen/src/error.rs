use thiserror::Error;

/// Everything that can go wrong when calling into this crate.
///
/// All variants signal a violated precondition on the caller's side: there is
/// no partial result and nothing to retry.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TellegenError {
    #[error("modulus must be monic")]
    NotMonic,

    #[error("modulus must have degree at least 1")]
    ZeroDegreeModulus,

    #[error("modulus must be squarefree")]
    NotSquarefree,

    #[error("expected {expected} elements, but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("expected at least {minimum} elements, but got {actual}")]
    InsufficientLength { minimum: usize, actual: usize },

    #[error("cannot compute {requested} terms of a recurrence of order {order}")]
    TooFewTerms { requested: usize, order: usize },

    #[error("tensor array must have {expected_rows} rows of {expected_cols} entries")]
    MalformedArray {
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("encountered an element without multiplicative inverse")]
    NotInvertible,

    #[error("cannot divide by the zero polynomial")]
    DivisionByZero,
}
