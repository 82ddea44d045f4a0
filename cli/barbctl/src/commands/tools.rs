//! Offline and lookup helpers: CPF check, masks, CEP lookup.

use anyhow::Result;
use barblab_forms::{check_cep_value, FormError};
use barblab_ident::{check_cpf, mask_cpf, only_digits, MaskKind, ValidationResult};
use barblab_postal::Address;
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_feedback, print_single, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct CpfArgs {
    /// CPF, with or without punctuation.
    value: String,
}

#[derive(Debug, Args)]
pub struct MaskArgs {
    /// Mask to apply: cpf, phone or cep.
    kind: MaskKind,

    /// Raw input; non-digits are dropped.
    value: String,
}

#[derive(Debug, Args)]
pub struct CepArgs {
    /// CEP, with or without the dash.
    value: String,
}

#[derive(Debug, Serialize)]
struct CpfReport {
    cpf: String,
    masked: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct CepReport {
    cep: String,
    found: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

/// Validate a CPF. Exits non-zero when it is invalid.
pub async fn cpf(ctx: CommandContext, args: CpfArgs) -> Result<()> {
    let checked = check_cpf(&args.value);
    let result = ValidationResult::from(checked.clone());
    let report = CpfReport {
        cpf: only_digits(&args.value),
        masked: mask_cpf(&args.value),
        valid: result.valid,
        reason: result.reason,
    };

    match ctx.format {
        OutputFormat::Json => print_single(&report),
        OutputFormat::Table => {
            println!("{}", report.masked);
            if let Some(reason) = &report.reason {
                println!("{}", reason);
            }
        }
    }

    checked.map_err(|e| CliError::from(FormError::InvalidCpf(e)))?;
    Ok(())
}

/// Print `value` with the given mask applied.
pub async fn mask(ctx: CommandContext, args: MaskArgs) -> Result<()> {
    let masked = args.kind.apply(&args.value);

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "kind": args.kind.as_str(),
            "masked": masked,
        })),
        OutputFormat::Table => println!("{}", masked),
    }
    Ok(())
}

/// Look up a CEP and print the address.
pub async fn cep(ctx: CommandContext, args: CepArgs) -> Result<()> {
    let postal = ctx.postal()?;
    let (verdict, address) = check_cep_value(&args.value, &postal).await;

    match ctx.format {
        OutputFormat::Json => print_single(&CepReport {
            cep: only_digits(&args.value),
            found: verdict.valid,
            message: verdict.feedback.message.clone(),
            address: address.clone(),
        }),
        OutputFormat::Table => {
            print_feedback("CEP", &verdict.feedback);
            if let Some(address) = &address {
                println!("{}", address.full_line());
            }
        }
    }

    if verdict.valid {
        Ok(())
    } else {
        Err(CliError::NotFound(MaskKind::Cep.apply(&args.value)).into())
    }
}
