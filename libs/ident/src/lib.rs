//! # barblab-ident
//!
//! Identifier normalization, input masks, and CPF validation for BarbLab.
//!
//! ## Design Principles
//!
//! - Every function is pure and total: malformed input yields a definite
//!   negative result, never a panic
//! - Display formatting (masks) is derived only from the digits present
//! - Outgoing payloads always carry the digits-only normalized value
//!
//! ## Formats
//!
//! | Value | Digits | Mask |
//! |-------|--------|------|
//! | CPF   | 11     | `529.982.247-25` |
//! | Phone | 10-11  | `(11) 3333-4444`, `(11) 98765-4321` |
//! | CEP   | 8      | `01310-100` |
//!
//! Masks are progressive: partial input yields a partially grouped string
//! (`"1234"` masks to `"123.4"` as a CPF), and masking is idempotent.

mod cpf;
mod digits;
mod error;
mod macros;
mod mask;
mod types;

pub use cpf::{check_cpf, check_digits, is_valid_cpf, validate_cpf, ValidationResult};
pub use digits::{digit_values, only_digits};
pub use error::IdentError;
pub use mask::{mask_cep, mask_cpf, mask_phone, MaskKind};
pub use types::*;
