//! Admin panel commands.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Session;
use crate::error::CliError;
use crate::output::{filter_rows, print_info, print_output, print_success};

use super::CommandContext;

/// Admin panel commands.
#[derive(Debug, Args)]
pub struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Log in to the admin panel.
    Login(AdminLoginArgs),

    /// Leave the admin panel.
    Logout,

    /// List registered clients.
    Clients(ListArgs),

    /// List booked appointments.
    Appointments(ListArgs),

    /// Delete a client and their appointments.
    DeleteClient(DeleteArgs),

    /// Delete an appointment.
    DeleteAppointment(DeleteArgs),

    /// Download the client list as CSV.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
struct AdminLoginArgs {
    /// Admin user name.
    #[arg(long)]
    user: String,

    /// Admin password.
    #[arg(long, env = "BARB_ADMIN_PASSWORD")]
    password: String,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only show rows containing this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Record ID.
    id: i64,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, Args)]
struct ExportArgs {
    /// Output file.
    #[arg(long, default_value = "clientes.csv")]
    out: PathBuf,
}

impl AdminCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            AdminSubcommand::Login(args) => login(ctx, args).await,
            AdminSubcommand::Logout => logout(ctx).await,
            AdminSubcommand::Clients(args) => list_clients(ctx, args).await,
            AdminSubcommand::Appointments(args) => list_appointments(ctx, args).await,
            AdminSubcommand::DeleteClient(args) => delete_client(ctx, args).await,
            AdminSubcommand::DeleteAppointment(args) => delete_appointment(ctx, args).await,
            AdminSubcommand::Export(args) => export(ctx, args).await,
        }
    }
}

/// Log in to the admin panel, keeping any client login in the same session.
async fn login(ctx: CommandContext, args: AdminLoginArgs) -> Result<()> {
    let cookie = ctx.client()?.admin_login(&args.user, &args.password).await?;

    let client_id = ctx.session.as_ref().and_then(|s| s.client_id);
    Session {
        cookie,
        client_id,
        admin: true,
    }
    .save()?;
    info!(user = %args.user, "Admin logged in");

    print_success("Logged in to the admin panel.");
    Ok(())
}

async fn logout(ctx: CommandContext) -> Result<()> {
    let Some(mut session) = ctx.session.clone() else {
        print_info("No saved session.");
        return Ok(());
    };

    if let Some(cookie) = ctx.client()?.admin_logout().await? {
        session.cookie = cookie;
    }
    session.admin = false;

    if session.is_anonymous() {
        Session::delete()?;
    } else {
        session.save()?;
    }

    print_success("Left the admin panel.");
    Ok(())
}

async fn list_clients(ctx: CommandContext, args: ListArgs) -> Result<()> {
    require_admin(&ctx)?;
    let clients = ctx.client()?.clients().await?;
    let clients = filter_rows(clients, args.search.as_deref());

    print_output(&clients, ctx.format);
    Ok(())
}

async fn list_appointments(ctx: CommandContext, args: ListArgs) -> Result<()> {
    require_admin(&ctx)?;
    let appointments = ctx.client()?.appointments().await?;
    let appointments = filter_rows(appointments, args.search.as_deref());

    print_output(&appointments, ctx.format);
    Ok(())
}

async fn delete_client(ctx: CommandContext, args: DeleteArgs) -> Result<()> {
    require_admin(&ctx)?;
    if !args.yes && !confirm(&format!("Delete client {} and their appointments?", args.id))? {
        print_info("Cancelled.");
        return Ok(());
    }

    ctx.client()?.delete_client(args.id).await?;
    info!(client_id = args.id, "Client deleted");

    print_success(&format!("Deleted client {}.", args.id));
    Ok(())
}

async fn delete_appointment(ctx: CommandContext, args: DeleteArgs) -> Result<()> {
    require_admin(&ctx)?;
    if !args.yes && !confirm(&format!("Delete appointment {}?", args.id))? {
        print_info("Cancelled.");
        return Ok(());
    }

    ctx.client()?.delete_appointment(args.id).await?;
    info!(appointment_id = args.id, "Appointment deleted");

    print_success(&format!("Deleted appointment {}.", args.id));
    Ok(())
}

async fn export(ctx: CommandContext, args: ExportArgs) -> Result<()> {
    require_admin(&ctx)?;
    let csv = ctx.client()?.export_csv().await?;

    std::fs::write(&args.out, &csv)
        .with_context(|| format!("Failed to write {:?}", args.out))?;

    print_success(&format!(
        "Exported {} bytes to {}.",
        csv.len(),
        args.out.display()
    ));
    Ok(())
}

/// Fails fast when no admin login was saved.
fn require_admin(ctx: &CommandContext) -> Result<(), CliError> {
    match &ctx.session {
        Some(session) if session.admin => Ok(()),
        _ => Err(CliError::NotAuthenticated),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
