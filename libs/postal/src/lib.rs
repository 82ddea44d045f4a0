//! # barblab-postal
//!
//! Postal code (CEP) lookup for address auto-fill.
//!
//! A lookup either finds an [`Address`] or reports [`LookupOutcome::NotFound`].
//! Forms never see transport failures: [`lookup_or_not_found`] collapses
//! every error into `NotFound`.

mod address;
mod error;
mod viacep;

use async_trait::async_trait;
use barblab_ident::{only_digits, Cep};
use tracing::{debug, warn};

pub use address::{Address, LookupOutcome};
pub use error::LookupError;
pub use viacep::{ViaCepClient, DEFAULT_VIACEP_URL};

/// A service that resolves a CEP to an address.
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Looks up `cep`. Errors are transport or service failures; an unknown
    /// CEP is `Ok(LookupOutcome::NotFound)`.
    async fn lookup(&self, cep: &Cep) -> Result<LookupOutcome, LookupError>;
}

/// Normalizes `raw` and looks it up, treating every failure as not found.
///
/// Inputs that do not hold exactly 8 digits are rejected without a request.
pub async fn lookup_or_not_found<L>(lookup: &L, raw: &str) -> LookupOutcome
where
    L: PostalLookup + ?Sized,
{
    let cep = match Cep::parse(raw) {
        Ok(cep) => cep,
        Err(e) => {
            debug!(digits = %only_digits(raw), error = %e, "Skipping lookup for malformed CEP");
            return LookupOutcome::NotFound;
        }
    };

    match lookup.lookup(&cep).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(cep = %cep.digits(), error = %e, "Postal lookup failed; treating as not found");
            LookupOutcome::NotFound
        }
    }
}
