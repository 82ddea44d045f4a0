//! Macros for defining digit-string value types.

/// Defines a newtype holding a normalized, digits-only value.
///
/// This generates:
/// - `parse()` accepting masked or free-form input
/// - `digits()` returning the normalized value sent in payloads
/// - `masked()` and `Display` using the given mask
/// - `FromStr`, `Serialize` (digits only) and `Deserialize` (any format)
///
/// # Example
///
/// ```ignore
/// define_digits!(Cep, "CEP", "8", |n| n == 8, mask_cep, no_extra_check);
///
/// let cep: Cep = "01310-100".parse()?;
/// assert_eq!(cep.digits(), "01310100");
/// ```
#[macro_export]
macro_rules! define_digits {
    ($name:ident, $field:literal, $expected:literal, $len_ok:expr, $mask:path, $check:path) => {
        #[doc = concat!("A validated ", $field, " stored as digits only.")]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Human-readable name used in error messages.
            pub const FIELD: &'static str = $field;

            /// Parses a value from any input, keeping only its digits.
            pub fn parse(s: &str) -> Result<Self, $crate::IdentError> {
                let digits = $crate::only_digits(s);
                if digits.is_empty() {
                    return Err($crate::IdentError::Empty { field: $field });
                }

                let len_ok: fn(usize) -> bool = $len_ok;
                if !len_ok(digits.len()) {
                    return Err($crate::IdentError::WrongLength {
                        field: $field,
                        expected: $expected,
                        actual: digits.len(),
                    });
                }

                $check(&digits)?;
                Ok(Self(digits))
            }

            /// The normalized digits-only value.
            #[must_use]
            pub fn digits(&self) -> &str {
                &self.0
            }

            /// The value formatted for display.
            #[must_use]
            pub fn masked(&self) -> String {
                $mask(&self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.masked())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
