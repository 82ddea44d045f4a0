//! Typed, normalized values for the identifiers a booking form collects.
//!
//! Each type stores digits only. `Display` renders the mask; serde writes the
//! digits-only form that the backend expects in payloads.

use crate::define_digits;
use crate::error::IdentError;
use crate::mask::{mask_cep, mask_cpf, mask_phone};

fn no_extra_check(_digits: &str) -> Result<(), IdentError> {
    Ok(())
}

define_digits!(Cpf, "CPF", "11", |n| n == 11, mask_cpf, crate::cpf::check_cpf);
define_digits!(
    Phone,
    "phone",
    "10 or 11",
    |n| n == 10 || n == 11,
    mask_phone,
    no_extra_check
);
define_digits!(Cep, "CEP", "8", |n| n == 8, mask_cep, no_extra_check);

impl Phone {
    /// Returns true for 11-digit (mobile) numbers.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.digits().len() == 11
    }

    /// The two-digit area code.
    #[must_use]
    pub fn area_code(&self) -> &str {
        &self.digits()[..2]
    }
}

// =============================================================================
// Tests
// =============================================================================
