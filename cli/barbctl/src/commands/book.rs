//! Appointment booking.

use anyhow::Result;
use barblab_forms::submit::Booking;
use barblab_ident::mask_phone;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::error::CliError;
use crate::output::{print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Book an appointment.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Service, e.g. "Corte".
    #[arg(long)]
    service: String,

    /// Barber's name.
    #[arg(long)]
    barber: String,

    /// Date as YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Time as HH:MM.
    #[arg(long)]
    time: String,

    /// Notes for the barber.
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct BookingReceipt {
    id: Option<i64>,
    client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    service: String,
    barber: String,
    date: String,
    time: String,
}

impl BookCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        if ctx.session.is_none() {
            return Err(CliError::NotAuthenticated.into());
        }

        let client = ctx.client()?;
        let me = client.me().await?.ok_or(CliError::NotAuthenticated)?;

        let payload = Booking {
            service: self.service,
            barber: self.barber,
            date: self.date,
            time: self.time,
            notes: self.notes.unwrap_or_default(),
        }
        .validate()
        .map_err(CliError::from)?;

        let ok = client.book(&payload).await?;
        info!(appointment_id = ?ok.id, client_id = me.id, "Appointment booked");

        let receipt = BookingReceipt {
            id: ok.id,
            client: me.name,
            phone: me.phone.filter(|p| !p.is_empty()),
            service: payload.service,
            barber: payload.barber,
            date: payload.date,
            time: payload.time,
        };

        match ctx.format {
            OutputFormat::Json => print_single(&receipt),
            OutputFormat::Table => {
                print_success(&format!(
                    "{} with {} on {} at {}.",
                    receipt.service, receipt.barber, receipt.date, receipt.time
                ));
                print_info(&format!("Booked for {}", receipt.client));
                if let Some(phone) = &receipt.phone {
                    print_info(&format!("Contact: {}", mask_phone(phone)));
                }
            }
        }

        Ok(())
    }
}
