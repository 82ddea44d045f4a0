//! Client account commands.

use anyhow::Result;
use barblab_forms::submit::{check_max_digits, Login, Registration};
use barblab_forms::{
    on_cep_blur, on_cpf_blur, FieldController, FieldState, FormError, FormField, TextField,
};
use barblab_ident::{mask_cpf, mask_phone, Cpf, MaskKind};
use clap::Args;
use colored::Colorize;
use tracing::{info, warn};

use crate::config::Session;
use crate::error::CliError;
use crate::output::{print_feedback, print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Full name.
    #[arg(long)]
    name: String,

    /// CPF, with or without punctuation.
    #[arg(long)]
    cpf: String,

    /// Password (at least 6 characters).
    #[arg(long, env = "BARB_PASSWORD")]
    password: String,

    /// Password again.
    #[arg(long)]
    password_confirmation: String,

    /// E-mail address.
    #[arg(long)]
    email: Option<String>,

    /// Phone with area code.
    #[arg(long)]
    phone: Option<String>,

    /// CEP; the address is looked up when --address is not given.
    #[arg(long)]
    cep: Option<String>,

    /// Street address.
    #[arg(long)]
    address: Option<String>,

    /// Notes for the barber.
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// CPF, with or without punctuation.
    #[arg(long)]
    cpf: String,

    /// Password.
    #[arg(long, env = "BARB_PASSWORD")]
    password: String,
}

/// Runs the registration form: masks, blur checks, then submit.
pub async fn register(ctx: CommandContext, args: RegisterArgs) -> Result<()> {
    check_raw_fields(&args).map_err(CliError::from)?;

    let client = ctx.client()?;
    let postal = ctx.postal()?;
    let show = ctx.format == OutputFormat::Table;

    let mut cpf_ctrl = FieldController::masked(MaskKind::Cpf);
    let mut cpf = TextField::new(args.cpf);
    cpf_ctrl.on_input(&mut cpf);
    let state = on_cpf_blur(&mut cpf_ctrl, &mut cpf, Some(&client)).await;
    if show {
        print_field("CPF", &cpf);
    }
    if state == FieldState::Invalid {
        let err = match Cpf::parse(&cpf.value()) {
            Err(e) => FormError::InvalidCpf(e),
            Ok(_) => FormError::CpfTaken,
        };
        return Err(CliError::from(err).into());
    }

    let mut phone_ctrl = FieldController::masked(MaskKind::Phone);
    let mut phone = TextField::new(args.phone.unwrap_or_default());
    phone_ctrl.on_input(&mut phone);

    let mut address = TextField::new(args.address.unwrap_or_default());
    let mut cep = TextField::new(args.cep.unwrap_or_default());
    if !cep.value().trim().is_empty() {
        let mut cep_ctrl = FieldController::masked(MaskKind::Cep);
        let mut found = TextField::default();
        cep_ctrl.on_input(&mut cep);
        on_cep_blur(&mut cep_ctrl, &mut cep, &mut found, &postal).await;
        if show {
            print_field("CEP", &cep);
        }
        if address.value().trim().is_empty() && !found.value().is_empty() {
            address.set_value(&found.value());
        }
    }

    let payload = Registration {
        name: args.name,
        cpf: cpf.value(),
        password: args.password,
        password_confirmation: args.password_confirmation,
        email: args.email.unwrap_or_default(),
        phone: phone.value(),
        cep: cep.value(),
        address: address.value(),
        notes: args.notes.unwrap_or_default(),
    }
    .validate()
    .map_err(CliError::from)?;

    let (ok, cookie) = client.register(&payload).await?;
    info!(client_id = ?ok.id, "Client registered");

    match cookie {
        Some(cookie) => Session {
            cookie,
            client_id: ok.id,
            admin: false,
        }
        .save()?,
        None => warn!("Registration response carried no session cookie"),
    }

    match ctx.format {
        OutputFormat::Json => print_single(&ok),
        OutputFormat::Table => {
            print_success(&format!("Registered {}.", payload.name));
            print_info("Book with `barb book`.");
        }
    }

    Ok(())
}

/// Checks the arguments as given, before masking truncates them.
fn check_raw_fields(args: &RegisterArgs) -> Result<(), FormError> {
    check_max_digits(MaskKind::Cpf, &args.cpf)?;
    if let Some(phone) = &args.phone {
        check_max_digits(MaskKind::Phone, phone)?;
    }
    if let Some(cep) = &args.cep {
        check_max_digits(MaskKind::Cep, cep)?;
    }
    Ok(())
}

/// Log in as a client and save the session.
pub async fn login(ctx: CommandContext, args: LoginArgs) -> Result<()> {
    let payload = Login {
        cpf: args.cpf,
        password: args.password,
    }
    .validate()
    .map_err(CliError::from)?;

    let client = ctx.client()?;
    let (ok, cookie) = client.login(&payload).await?;
    let cookie =
        cookie.ok_or_else(|| anyhow::anyhow!("Login succeeded but no session cookie was set"))?;

    let admin = ctx.session.as_ref().is_some_and(|s| s.admin);
    Session {
        cookie,
        client_id: ok.id,
        admin,
    }
    .save()?;
    info!(client_id = ?ok.id, "Client logged in");

    match ctx.format {
        OutputFormat::Json => print_single(&ok),
        OutputFormat::Table => print_success("Logged in successfully."),
    }
    Ok(())
}

/// Log out the client. An admin login in the same session is kept.
pub async fn logout(ctx: CommandContext) -> Result<()> {
    let Some(session) = ctx.session.clone() else {
        Session::delete()?;
        print_success("Logged out successfully.");
        return Ok(());
    };

    let cookie = match ctx.client()?.logout().await {
        Ok((_, cookie)) => cookie,
        Err(e) => {
            warn!(error = %e, "Backend logout failed; dropping local client login anyway");
            None
        }
    };

    match without_client(session, cookie) {
        Some(remaining) => {
            remaining.save()?;
            print_success("Logged out. The admin login is still active.");
        }
        None => {
            Session::delete()?;
            print_success("Logged out successfully.");
        }
    }
    Ok(())
}

/// The session left after a client logout, or `None` when nothing remains.
fn without_client(mut session: Session, cookie: Option<String>) -> Option<Session> {
    session.client_id = None;
    if let Some(cookie) = cookie {
        session.cookie = cookie;
    }
    (!session.is_anonymous()).then_some(session)
}

/// Show the logged-in client.
pub async fn whoami(ctx: CommandContext) -> Result<()> {
    let Some(me) = ctx.client()?.me().await? else {
        println!("{} Not logged in", "Status:".red().bold());
        println!("\nRun {} to log in.", "barb login".cyan());
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Json => print_single(&me),
        OutputFormat::Table => {
            println!("{} {}", "Name:".bold(), me.name);
            println!("{} {}", "CPF:".bold(), mask_cpf(&me.cpf));
            if let Some(email) = me.email.as_deref().filter(|e| !e.is_empty()) {
                println!("{} {}", "E-mail:".bold(), email);
            }
            if let Some(phone) = me.phone.as_deref().filter(|p| !p.is_empty()) {
                println!("{} {}", "Phone:".bold(), mask_phone(phone));
            }
        }
    }
    Ok(())
}

fn print_field(label: &str, field: &TextField) {
    match field.feedback() {
        Some(feedback) => print_feedback(label, feedback),
        None => print_info(&format!("{}: {}", label, field.value())),
    }
}
