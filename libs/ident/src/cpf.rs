//! CPF checksum validation.
//!
//! A CPF is 11 digits: a 9-digit base followed by two check digits. Each
//! check digit is a weighted sum modulo 11 over the digits before it, with
//! weights counting down to 2. A remainder below 2 maps to 0, anything else
//! to `11 - remainder`.

use serde::Serialize;

use crate::digits::digit_values;
use crate::error::IdentError;

const FIELD: &str = "CPF";
const LEN: usize = 11;

/// Computes both check digits for a 9-digit CPF base.
#[must_use]
pub fn check_digits(base: &[u8; 9]) -> [u8; 2] {
    let first = check_digit(base);

    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(base);
    extended[9] = first;

    [first, check_digit(&extended)]
}

/// Weighted sum over `digits` with weights `len + 1` down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => (11 - r) as u8,
    }
}

/// Validates a CPF given in any format, returning the reason on failure.
pub fn check_cpf(input: &str) -> Result<(), IdentError> {
    let digits = digit_values(input);

    if digits.is_empty() {
        return Err(IdentError::Empty { field: FIELD });
    }
    if digits.len() != LEN {
        return Err(IdentError::WrongLength {
            field: FIELD,
            expected: "11",
            actual: digits.len(),
        });
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return Err(IdentError::RepeatedDigits { field: FIELD });
    }

    let mut base = [0u8; 9];
    base.copy_from_slice(&digits[..9]);
    let expected = check_digits(&base);
    let actual = [digits[9], digits[10]];

    if expected != actual {
        return Err(IdentError::ChecksumMismatch {
            field: FIELD,
            expected: format!("{}{}", expected[0], expected[1]),
            actual: format!("{}{}", actual[0], actual[1]),
        });
    }

    Ok(())
}

/// Returns true if `input` holds a valid CPF (any mask or separators allowed).
#[must_use]
pub fn is_valid_cpf(input: &str) -> bool {
    check_cpf(input).is_ok()
}

/// Outcome of a validation, ready for field feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<Result<(), IdentError>> for ValidationResult {
    fn from(result: Result<(), IdentError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::invalid(e.to_string()),
        }
    }
}

/// Validates a CPF and packages the outcome with a human-readable reason.
#[must_use]
pub fn validate_cpf(input: &str) -> ValidationResult {
    check_cpf(input).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KNOWN_VALID: &str = "529.982.247-25";

    #[test]
    fn test_known_valid_cpf() {
        assert!(is_valid_cpf(KNOWN_VALID));
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf(" 529 982 247 25 "));
    }

    #[test]
    fn test_check_digits_known_base() {
        assert_eq!(check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), [2, 5]);
    }

    #[test]
    fn test_every_single_digit_mutation_is_invalid() {
        let digits: Vec<u8> = "52998224725".bytes().map(|b| b - b'0').collect();
        for pos in 0..digits.len() {
            for delta in 1..10u8 {
                let mut mutated = digits.clone();
                mutated[pos] = (mutated[pos] + delta) % 10;
                let s: String = mutated.iter().map(|d| char::from(b'0' + d)).collect();
                assert!(!is_valid_cpf(&s), "mutation {s} should be invalid");
            }
        }
    }

    #[test]
    fn test_repeated_digits_rejected() {
        for d in 0..10u8 {
            let s = char::from(b'0' + d).to_string().repeat(11);
            assert_eq!(
                check_cpf(&s),
                Err(IdentError::RepeatedDigits { field: "CPF" })
            );
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            check_cpf("5299822472"),
            Err(IdentError::WrongLength { actual: 10, .. })
        ));
        assert!(matches!(
            check_cpf("529982247250"),
            Err(IdentError::WrongLength { actual: 12, .. })
        ));
        assert!(matches!(check_cpf("abc"), Err(IdentError::Empty { .. })));
    }

    #[test]
    fn test_checksum_mismatch_reports_digits() {
        let err = check_cpf("529.982.247-26").unwrap_err();
        assert!(err.is_checksum_error());
        assert_eq!(
            err,
            IdentError::ChecksumMismatch {
                field: "CPF",
                expected: "25".to_string(),
                actual: "26".to_string(),
            }
        );
    }

    #[test]
    fn test_validation_result() {
        assert_eq!(validate_cpf(KNOWN_VALID), ValidationResult::ok());
        let result = validate_cpf("123");
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("11 digits"));
    }

    proptest! {
        #[test]
        fn prop_generated_cpfs_validate(base in prop::array::uniform9(0u8..10)) {
            prop_assume!(base.iter().any(|&d| d != base[0]));
            let [a, b] = check_digits(&base);
            let s: String = base
                .iter()
                .chain([a, b].iter())
                .map(|d| char::from(b'0' + d))
                .collect();
            prop_assert!(is_valid_cpf(&s));
        }

        #[test]
        fn prop_non_eleven_digit_inputs_are_invalid(digits in "[0-9]{0,30}") {
            prop_assume!(digits.len() != 11);
            prop_assert!(!is_valid_cpf(&digits));
            prop_assert!(check_cpf(&digits).unwrap_err().is_format_error());
        }

        #[test]
        fn prop_any_eleven_digits_terminates(digits in "[0-9]{11}") {
            let _ = is_valid_cpf(&digits);
        }
    }
}
