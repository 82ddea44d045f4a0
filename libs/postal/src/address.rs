//! Address records returned by postal lookups.

use serde::{Deserialize, Serialize};

/// A resolved address. Any field may be missing; lookup services often
/// return partial records for rural or city-wide CEPs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Two-letter state code (e.g. `SP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Address {
    /// Short form used as field feedback: `street - city/UF`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} - {}", part(&self.street), self.locality())
    }

    /// Full form used to fill the address field:
    /// `street - neighborhood - city/UF`.
    #[must_use]
    pub fn full_line(&self) -> String {
        format!(
            "{} - {} - {}",
            part(&self.street),
            part(&self.neighborhood),
            self.locality()
        )
    }

    fn locality(&self) -> String {
        format!("{}/{}", part(&self.city), part(&self.region))
    }
}

fn part(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Result of a postal lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(Address),
    NotFound,
}

impl LookupOutcome {
    /// Returns the address if one was found.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        match self {
            LookupOutcome::Found(address) => Some(address),
            LookupOutcome::NotFound => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}
