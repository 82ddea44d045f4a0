//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Reasons a value fails to normalize or validate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentError {
    /// The value contains no digits at all.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The digit count does not fit the format.
    #[error("{field} must have {expected} digits, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// All digits are the same (e.g. `000.000.000-00`).
    #[error("{field} cannot be a repeated digit sequence")]
    RepeatedDigits { field: &'static str },

    /// The check digits do not match the computed ones.
    #[error("{field} check digits do not match: expected {expected}, got {actual}")]
    ChecksumMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// The mask name is not one of `cpf`, `phone`, `cep`.
    #[error("unknown mask '{0}': expected cpf, phone or cep")]
    UnknownMask(String),
}

impl IdentError {
    /// Returns true if the input could not be normalized to the expected digit count.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            IdentError::Empty { .. } | IdentError::WrongLength { .. }
        )
    }

    /// Returns true if digits were present but rejected by the checksum rules.
    pub fn is_checksum_error(&self) -> bool {
        matches!(
            self,
            IdentError::RepeatedDigits { .. } | IdentError::ChecksumMismatch { .. }
        )
    }
}
