//! Blur handlers for the CPF and CEP fields.
//!
//! `check_*_value` compute a verdict from a raw value without touching any
//! field; `on_*_blur` wire them through a [`FieldController`].

use barblab_ident::{is_valid_cpf, Cpf};
use barblab_postal::{lookup_or_not_found, Address, LookupOutcome, PostalLookup};
use tracing::debug;

use crate::availability::{Availability, AvailabilityCheck};
use crate::controller::FieldController;
use crate::field::{Feedback, FormField};
use crate::state::FieldState;

const CPF_INVALID: &str = "CPF inválido";
const CPF_TAKEN: &str = "CPF já cadastrado.";
const CPF_AVAILABLE: &str = "CPF disponível";
const CPF_UNVERIFIED: &str = "CPF válido (disponibilidade não verificada)";
const CPF_VALID: &str = "CPF válido";
const CEP_NOT_FOUND: &str = "CEP inválido ou não encontrado";

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub feedback: Feedback,
}

impl Verdict {
    #[must_use]
    pub fn valid(feedback: Feedback) -> Self {
        Self {
            valid: true,
            feedback,
        }
    }

    #[must_use]
    pub fn invalid(feedback: Feedback) -> Self {
        Self {
            valid: false,
            feedback,
        }
    }
}

/// Validates a CPF and, if an availability service is given, checks that it
/// is not registered yet.
///
/// A failed availability check does not pass as "available": the CPF is
/// reported valid with the availability left explicitly unverified.
pub async fn check_cpf_value(
    raw: &str,
    availability: Option<&dyn AvailabilityCheck>,
) -> Verdict {
    if !is_valid_cpf(raw) {
        return Verdict::invalid(Feedback::negative(CPF_INVALID));
    }

    let Some(service) = availability else {
        return Verdict::valid(Feedback::positive(CPF_VALID));
    };

    // Cannot fail: validity was checked above.
    let Ok(cpf) = Cpf::parse(raw) else {
        return Verdict::invalid(Feedback::negative(CPF_INVALID));
    };

    match service.check(&cpf).await {
        Availability::Available => Verdict::valid(Feedback::positive(CPF_AVAILABLE)),
        Availability::Taken => Verdict::invalid(Feedback::negative(CPF_TAKEN)),
        Availability::Unknown => {
            debug!(cpf = %cpf.digits(), "CPF availability unknown");
            Verdict::valid(Feedback::neutral(CPF_UNVERIFIED))
        }
    }
}

/// Looks up a CEP. On success the verdict carries the short address summary
/// and the address itself is returned for auto-fill.
pub async fn check_cep_value<L>(raw: &str, lookup: &L) -> (Verdict, Option<Address>)
where
    L: PostalLookup + ?Sized,
{
    match lookup_or_not_found(lookup, raw).await {
        LookupOutcome::Found(address) => (
            Verdict::valid(Feedback::positive(address.summary())),
            Some(address),
        ),
        LookupOutcome::NotFound => (Verdict::invalid(Feedback::negative(CEP_NOT_FOUND)), None),
    }
}

/// CPF blur: validate, check availability, and show the result.
pub async fn on_cpf_blur<F>(
    ctrl: &mut FieldController,
    field: &mut F,
    availability: Option<&dyn AvailabilityCheck>,
) -> FieldState
where
    F: FormField + ?Sized,
{
    let ticket = ctrl.on_blur();
    let verdict = check_cpf_value(&field.value(), availability).await;
    ctrl.complete(ticket, field, verdict);
    ctrl.state()
}

/// CEP blur: look up the address, show the result, and fill `address_field`
/// when one is found.
pub async fn on_cep_blur<F, A, L>(
    ctrl: &mut FieldController,
    field: &mut F,
    address_field: &mut A,
    lookup: &L,
) -> FieldState
where
    F: FormField + ?Sized,
    A: FormField + ?Sized,
    L: PostalLookup + ?Sized,
{
    let ticket = ctrl.on_blur();
    let (verdict, address) = check_cep_value(&field.value(), lookup).await;
    if ctrl.complete(ticket, field, verdict) {
        if let Some(address) = address {
            address_field.set_value(&address.full_line());
        }
    }
    ctrl.state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{TextField, Tone};
    use async_trait::async_trait;
    use barblab_ident::{Cep, MaskKind};
    use barblab_postal::LookupError;

    struct FixedAvailability(Availability);

    #[async_trait]
    impl AvailabilityCheck for FixedAvailability {
        async fn check(&self, _cpf: &Cpf) -> Availability {
            self.0
        }
    }

    struct FakeLookup(Result<LookupOutcome, u16>);

    #[async_trait]
    impl PostalLookup for FakeLookup {
        async fn lookup(&self, _cep: &Cep) -> Result<LookupOutcome, LookupError> {
            self.0.clone().map_err(LookupError::Status)
        }
    }

    fn paulista() -> Address {
        Address {
            street: Some("Avenida Paulista".into()),
            neighborhood: Some("Bela Vista".into()),
            city: Some("São Paulo".into()),
            region: Some("SP".into()),
        }
    }

    #[tokio::test]
    async fn test_invalid_cpf() {
        let verdict = check_cpf_value("111.111.111-11", None).await;
        assert!(!verdict.valid);
        assert_eq!(verdict.feedback, Feedback::negative("CPF inválido"));
    }

    #[tokio::test]
    async fn test_cpf_availability_outcomes() {
        let taken = FixedAvailability(Availability::Taken);
        let verdict = check_cpf_value("529.982.247-25", Some(&taken)).await;
        assert!(!verdict.valid);
        assert_eq!(verdict.feedback.message, "CPF já cadastrado.");

        let free = FixedAvailability(Availability::Available);
        let verdict = check_cpf_value("529.982.247-25", Some(&free)).await;
        assert!(verdict.valid);
        assert_eq!(verdict.feedback.tone, Tone::Positive);

        let unknown = FixedAvailability(Availability::Unknown);
        let verdict = check_cpf_value("529.982.247-25", Some(&unknown)).await;
        assert!(verdict.valid);
        assert_eq!(verdict.feedback.tone, Tone::Neutral);
    }

    #[tokio::test]
    async fn test_cpf_blur_updates_field() {
        let mut ctrl = FieldController::masked(MaskKind::Cpf);
        let mut field = TextField::new("52998224725");
        ctrl.on_input(&mut field);

        let state = on_cpf_blur(&mut ctrl, &mut field, None).await;
        assert_eq!(state, FieldState::Valid);
        assert_eq!(field.value(), "529.982.247-25");
        assert_eq!(field.feedback().unwrap().message, "CPF válido");
    }

    #[tokio::test]
    async fn test_cep_blur_fills_address() {
        let lookup = FakeLookup(Ok(LookupOutcome::Found(paulista())));
        let mut ctrl = FieldController::masked(MaskKind::Cep);
        let mut cep = TextField::new("01310100");
        let mut address = TextField::default();
        ctrl.on_input(&mut cep);

        let state = on_cep_blur(&mut ctrl, &mut cep, &mut address, &lookup).await;
        assert_eq!(state, FieldState::Valid);
        assert_eq!(
            cep.feedback().unwrap().message,
            "Avenida Paulista - São Paulo/SP"
        );
        assert_eq!(
            address.value(),
            "Avenida Paulista - Bela Vista - São Paulo/SP"
        );
    }

    #[tokio::test]
    async fn test_cep_blur_failure_is_not_found() {
        let lookup = FakeLookup(Err(500));
        let mut ctrl = FieldController::masked(MaskKind::Cep);
        let mut cep = TextField::new("01310-100");
        let mut address = TextField::new("typed by hand");

        let state = on_cep_blur(&mut ctrl, &mut cep, &mut address, &lookup).await;
        assert_eq!(state, FieldState::Invalid);
        assert_eq!(
            cep.feedback().unwrap().message,
            "CEP inválido ou não encontrado"
        );
        assert_eq!(address.value(), "typed by hand");
    }
}
