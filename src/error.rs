//! Error types for Laurent polynomial operations.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or computing with polynomials.
///
/// All errors are raised at the point of detection and are terminal for the
/// requested operation: no partially computed polynomial is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input string does not match the polynomial grammar.
    #[error("Could not parse '{fragment}': {reason}")]
    Parse {
        /// The offending part of the input
        fragment: String,
        /// Why the fragment was rejected
        reason: String,
    },

    /// Division by the zero polynomial, a zero term or the number zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Direct addition or subtraction of two terms with different exponents.
    #[error("Terms {lhs} and {rhs} are not similar")]
    IncompatibleTerms {
        /// Left-hand side term
        lhs: String,
        /// Right-hand side term
        rhs: String,
    },

    /// An operator was applied to a combination of operands it does not support.
    #[error("Unsupported operands for '{op}': {lhs} and {rhs}")]
    UnsupportedOperand {
        /// The operator
        op: &'static str,
        /// Kind of the left-hand side
        lhs: String,
        /// Kind of the right-hand side
        rhs: String,
    },
}

impl Error {
    pub(crate) fn parse(fragment: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::Parse {
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }
}
