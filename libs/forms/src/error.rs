//! Submission errors.
//!
//! Messages are the ones shown to the person filling in the form.

use barblab_ident::IdentError;
use thiserror::Error;

/// Why a form cannot be submitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// One or more required fields are blank.
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("CPF inválido.")]
    InvalidCpf(#[source] IdentError),

    /// The CPF is valid but already registered.
    #[error("CPF já cadastrado.")]
    CpfTaken,

    #[error("Telefone inválido.")]
    InvalidPhone(#[source] IdentError),

    #[error("CEP inválido.")]
    InvalidCep(#[source] IdentError),

    #[error("Senha deve ter ao menos {min} caracteres.")]
    PasswordTooShort { min: usize },

    #[error("Senhas não coincidem.")]
    PasswordMismatch,

    #[error("Data inválida: use AAAA-MM-DD.")]
    InvalidDate(String),

    #[error("Horário inválido: use HH:MM.")]
    InvalidTime(String),
}

impl FormError {
    /// Name of the field the error points at, if it points at one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FormError::MissingFields(_) => None,
            FormError::InvalidCpf(_) | FormError::CpfTaken => Some("cpf"),
            FormError::InvalidPhone(_) => Some("telefone"),
            FormError::InvalidCep(_) => Some("cep"),
            FormError::PasswordTooShort { .. } | FormError::PasswordMismatch => Some("password"),
            FormError::InvalidDate(_) => Some("data"),
            FormError::InvalidTime(_) => Some("horario"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_errors_point_at_cpf_field() {
        let invalid = FormError::InvalidCpf(IdentError::RepeatedDigits { field: "CPF" });
        assert_eq!(invalid.to_string(), "CPF inválido.");
        assert_eq!(invalid.field(), Some("cpf"));

        assert_eq!(FormError::CpfTaken.to_string(), "CPF já cadastrado.");
        assert_eq!(FormError::CpfTaken.field(), Some("cpf"));
    }
}
