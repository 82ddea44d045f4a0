//! Digit extraction.

/// Returns the decimal digits of `input`, in order, dropping everything else.
#[must_use]
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Returns the numeric values of the decimal digits in `input`.
#[must_use]
pub fn digit_values(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}
