//! Submission validation for the registration, login and booking forms.
//!
//! Each form holds the raw text of its fields. `validate()` runs the same
//! checks the page runs before sending and returns the payload the backend
//! expects, with CPF, phone and CEP reduced to digits.

use barblab_ident::{only_digits, Cep, Cpf, IdentError, MaskKind, Phone};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::FormError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Registration
// =============================================================================

/// Raw registration form values.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub cpf: String,
    pub password: String,
    pub password_confirmation: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub address: String,
    pub notes: String,
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterPayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: Cpf,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<Cep>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Registration {
    /// Checks the form and builds the request body.
    pub fn validate(&self) -> Result<RegisterPayload, FormError> {
        let name = self.name.trim();
        if name.is_empty() || self.cpf.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields("Preencha nome, CPF e senha."));
        }

        let cpf = Cpf::parse(&self.cpf).map_err(FormError::InvalidCpf)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }

        let phone = optional(&self.phone)
            .map(Phone::parse)
            .transpose()
            .map_err(FormError::InvalidPhone)?;
        let cep = optional(&self.cep)
            .map(Cep::parse)
            .transpose()
            .map_err(FormError::InvalidCep)?;

        Ok(RegisterPayload {
            name: name.to_string(),
            cpf,
            password: self.password.clone(),
            email: optional(&self.email).map(str::to_string),
            phone,
            cep,
            address: optional(&self.address).map(str::to_string),
            notes: optional(&self.notes).map(str::to_string),
        })
    }
}

// =============================================================================
// Login
// =============================================================================

/// Raw login form values.
#[derive(Debug, Clone, Default)]
pub struct Login {
    pub cpf: String,
    pub password: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub cpf: String,
    pub password: String,
}

impl Login {
    /// Checks that both fields are filled. The CPF is not checksum-validated
    /// here; the backend answers wrong credentials uniformly.
    pub fn validate(&self) -> Result<LoginPayload, FormError> {
        let cpf = only_digits(&self.cpf);
        if cpf.is_empty() || self.password.trim().is_empty() {
            return Err(FormError::MissingFields("Preencha CPF e senha."));
        }
        Ok(LoginPayload {
            cpf,
            password: self.password.clone(),
        })
    }
}

// =============================================================================
// Booking
// =============================================================================

/// Raw booking form values.
#[derive(Debug, Clone, Default)]
pub struct Booking {
    pub service: String,
    pub barber: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub notes: String,
}

/// Body of `POST /api/agendar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingPayload {
    #[serde(rename = "servico")]
    pub service: String,
    #[serde(rename = "barbeiro")]
    pub barber: String,
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "horario")]
    pub time: String,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Booking {
    /// Checks the form and builds the request body. Date and time are
    /// re-emitted in canonical `YYYY-MM-DD` / `HH:MM` form.
    pub fn validate(&self) -> Result<BookingPayload, FormError> {
        let service = self.service.trim();
        let barber = self.barber.trim();
        let date = self.date.trim();
        let time = self.time.trim();
        if service.is_empty() || barber.is_empty() || date.is_empty() || time.is_empty() {
            return Err(FormError::MissingFields(
                "Preencha serviço, barbeiro, data e horário.",
            ));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| FormError::InvalidTime(time.to_string()))?;

        Ok(BookingPayload {
            service: service.to_string(),
            barber: barber.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            time: time.format("%H:%M").to_string(),
            notes: optional(&self.notes).map(str::to_string),
        })
    }
}

/// Rejects raw input holding more digits than the `kind` mask keeps.
///
/// Masking truncates, so this has to run on the value as typed or pasted,
/// before it goes through [`FieldController::on_input`](crate::FieldController::on_input).
pub fn check_max_digits(kind: MaskKind, raw: &str) -> Result<(), FormError> {
    let actual = only_digits(raw).len();
    if actual <= kind.max_digits() {
        return Ok(());
    }

    Err(match kind {
        MaskKind::Cpf => FormError::InvalidCpf(IdentError::WrongLength {
            field: Cpf::FIELD,
            expected: "11",
            actual,
        }),
        MaskKind::Phone => FormError::InvalidPhone(IdentError::WrongLength {
            field: Phone::FIELD,
            expected: "10 or 11",
            actual,
        }),
        MaskKind::Cep => FormError::InvalidCep(IdentError::WrongLength {
            field: Cep::FIELD,
            expected: "8",
            actual,
        }),
    })
}

fn optional(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registration() -> Registration {
        Registration {
            name: "  João da Silva ".into(),
            cpf: "529.982.247-25".into(),
            password: "segredo1".into(),
            password_confirmation: "segredo1".into(),
            email: "joao@example.com".into(),
            phone: "(11) 98765-4321".into(),
            cep: "01310-100".into(),
            address: "Avenida Paulista - Bela Vista - São Paulo/SP".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_registration_payload_is_digits_only() {
        let payload = registration().validate().unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            body,
            json!({
                "nome": "João da Silva",
                "cpf": "52998224725",
                "password": "segredo1",
                "email": "joao@example.com",
                "telefone": "11987654321",
                "cep": "01310100",
                "endereco": "Avenida Paulista - Bela Vista - São Paulo/SP"
            })
        );
    }

    #[test]
    fn test_registration_requires_core_fields() {
        let form = Registration {
            name: " ".into(),
            ..registration()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingFields("Preencha nome, CPF e senha.")
        );
    }

    #[test]
    fn test_registration_rejects_invalid_cpf() {
        let form = Registration {
            cpf: "529.982.247-24".into(),
            ..registration()
        };
        let err = form.validate().unwrap_err();
        assert!(matches!(err, FormError::InvalidCpf(_)));
        assert_eq!(err.to_string(), "CPF inválido.");
        assert_eq!(err.field(), Some("cpf"));
    }

    #[test]
    fn test_registration_password_rules() {
        let short = Registration {
            password: "abc".into(),
            password_confirmation: "abc".into(),
            ..registration()
        };
        assert_eq!(
            short.validate().unwrap_err().to_string(),
            "Senha deve ter ao menos 6 caracteres."
        );

        let mismatch = Registration {
            password_confirmation: "segredo2".into(),
            ..registration()
        };
        assert_eq!(mismatch.validate().unwrap_err(), FormError::PasswordMismatch);
    }

    #[test]
    fn test_registration_optional_fields() {
        let form = Registration {
            email: String::new(),
            phone: String::new(),
            cep: " ".into(),
            address: String::new(),
            ..registration()
        };
        let payload = form.validate().unwrap();
        assert!(payload.phone.is_none());
        assert!(payload.cep.is_none());
        assert!(payload.email.is_none());

        let bad_phone = Registration {
            phone: "1234".into(),
            ..registration()
        };
        assert!(matches!(
            bad_phone.validate(),
            Err(FormError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_check_max_digits() {
        assert!(check_max_digits(MaskKind::Cpf, "529.982.247-25").is_ok());
        assert!(check_max_digits(MaskKind::Phone, "(11) 98765-4321").is_ok());
        assert!(check_max_digits(MaskKind::Cep, "").is_ok());

        let err = check_max_digits(MaskKind::Cpf, "5299822472599").unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidCpf(IdentError::WrongLength {
                field: "CPF",
                expected: "11",
                actual: 13,
            })
        );
        assert!(matches!(
            check_max_digits(MaskKind::Phone, "119876543210"),
            Err(FormError::InvalidPhone(_))
        ));
        assert!(matches!(
            check_max_digits(MaskKind::Cep, "01310-1000"),
            Err(FormError::InvalidCep(_))
        ));
    }

    #[test]
    fn test_login_payload() {
        let payload = Login {
            cpf: "529.982.247-25".into(),
            password: "segredo1".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.cpf, "52998224725");

        let missing = Login {
            cpf: "...".into(),
            password: "x".into(),
        };
        assert!(matches!(
            missing.validate(),
            Err(FormError::MissingFields(_))
        ));
    }

    #[test]
    fn test_booking_payload() {
        let payload = Booking {
            service: "Corte".into(),
            barber: "Carlos".into(),
            date: "2026-11-03".into(),
            time: "09:30".into(),
            notes: String::new(),
        }
        .validate()
        .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "servico": "Corte",
                "barbeiro": "Carlos",
                "data": "2026-11-03",
                "horario": "09:30"
            })
        );
    }

    #[test]
    fn test_booking_rejects_missing_and_malformed() {
        let missing = Booking {
            service: "Corte".into(),
            ..Booking::default()
        };
        assert!(matches!(
            missing.validate(),
            Err(FormError::MissingFields(_))
        ));

        let bad_date = Booking {
            service: "Corte".into(),
            barber: "Carlos".into(),
            date: "03/11/2026".into(),
            time: "09:30".into(),
            notes: String::new(),
        };
        assert!(matches!(bad_date.validate(), Err(FormError::InvalidDate(_))));

        let bad_time = Booking {
            date: "2026-11-03".into(),
            time: "25:00".into(),
            ..bad_date
        };
        assert!(matches!(bad_time.validate(), Err(FormError::InvalidTime(_))));
    }
}
