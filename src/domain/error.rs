//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid user input or text that cannot be handled.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("invalid title pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid value '{value}' for option {field}")]
    InvalidFlag { field: String, value: String },

    /// Text could not be represented in the target encoding.
    #[error("cannot encode text for {encoding}: {text:?}")]
    Encode { encoding: String, text: String },

    /// Bytes could not be decoded as text.
    #[error("{encoding} could not decode {detail}")]
    Decode { encoding: String, detail: String },
}
