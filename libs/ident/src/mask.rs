//! Progressive input masks.
//!
//! Each mask is a function of the digits present in its input only, truncated
//! to the format's maximum length. Separators are inserted only once a digit
//! follows them, so a half-typed value shows a half-grouped string.

use std::fmt;
use std::str::FromStr;

use crate::digits::only_digits;
use crate::error::IdentError;

const CPF_DIGITS: usize = 11;
const PHONE_DIGITS: usize = 11;
const CEP_DIGITS: usize = 8;

/// Formats up to 11 digits as `ddd.ddd.ddd-dd`.
#[must_use]
pub fn mask_cpf(input: &str) -> String {
    let digits = truncated(input, CPF_DIGITS);
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Formats up to 11 digits as `(DD) NNNN-NNNN` or `(DD) NNNNN-NNNN`.
///
/// The area code is wrapped once a third digit exists. The dash before the
/// last four digits appears once the number is long enough to be a landline
/// (10 digits); an 11th digit moves it one position right.
///
/// "Nine or more digits" for the dash counts the local number's digits
/// after the two-digit area code, so the threshold is 10 digits in total.
#[must_use]
pub fn mask_phone(input: &str) -> String {
    let digits = truncated(input, PHONE_DIGITS);
    if digits.len() <= 2 {
        return digits;
    }

    let (area, local) = digits.split_at(2);
    if digits.len() < 10 {
        return format!("({area}) {local}");
    }

    let (head, tail) = local.split_at(local.len() - 4);
    format!("({area}) {head}-{tail}")
}

/// Formats up to 8 digits as `ddddd-ddd`.
#[must_use]
pub fn mask_cep(input: &str) -> String {
    let digits = truncated(input, CEP_DIGITS);
    if digits.len() <= 5 {
        return digits;
    }
    let (head, tail) = digits.split_at(5);
    format!("{head}-{tail}")
}

fn truncated(input: &str, max: usize) -> String {
    let mut digits = only_digits(input);
    // ASCII only, so byte truncation is char-safe.
    digits.truncate(max);
    digits
}

/// The masks a form field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKind {
    Cpf,
    Phone,
    Cep,
}

impl MaskKind {
    /// Applies this mask to `input`.
    #[must_use]
    pub fn apply(self, input: &str) -> String {
        match self {
            MaskKind::Cpf => mask_cpf(input),
            MaskKind::Phone => mask_phone(input),
            MaskKind::Cep => mask_cep(input),
        }
    }

    /// Maximum number of digits kept by this mask.
    #[must_use]
    pub const fn max_digits(self) -> usize {
        match self {
            MaskKind::Cpf => CPF_DIGITS,
            MaskKind::Phone => PHONE_DIGITS,
            MaskKind::Cep => CEP_DIGITS,
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MaskKind::Cpf => "cpf",
            MaskKind::Phone => "phone",
            MaskKind::Cep => "cep",
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskKind {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpf" => Ok(MaskKind::Cpf),
            "phone" | "telefone" => Ok(MaskKind::Phone),
            "cep" => Ok(MaskKind::Cep),
            _ => Err(IdentError::UnknownMask(s.to_string())),
        }
    }
}
