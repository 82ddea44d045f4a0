//! CPF availability contract.

use async_trait::async_trait;
use barblab_ident::Cpf;
use serde::Serialize;

/// Whether a CPF can still be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Taken,
    /// The check could not be performed (service missing, failing, or
    /// answering with an error status).
    Unknown,
}

/// A service that knows which CPFs are already registered.
///
/// Implementations must not fail: anything short of a definite answer is
/// [`Availability::Unknown`].
#[async_trait]
pub trait AvailabilityCheck: Send + Sync {
    async fn check(&self, cpf: &Cpf) -> Availability;
}
