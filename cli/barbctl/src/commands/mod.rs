//! CLI commands.

mod account;
mod admin;
mod book;
mod tools;

use anyhow::Result;
use barblab_postal::ViaCepClient;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::{Config, Session};
use crate::output::OutputFormat;

/// barb - Register, book and manage appointments at the barbershop.
#[derive(Debug, Parser)]
#[command(name = "barb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Backend URL, overriding the configured one.
    #[arg(long, global = true, env = "BARB_API_URL")]
    api_url: Option<String>,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a client account.
    Register(account::RegisterArgs),

    /// Log in as a client.
    Login(account::LoginArgs),

    /// Log out and forget the saved session.
    Logout,

    /// Show the logged-in client.
    Whoami,

    /// Book an appointment.
    Book(book::BookCommand),

    /// Admin panel operations.
    Admin(admin::AdminCommand),

    /// Validate a CPF.
    Cpf(tools::CpfArgs),

    /// Format a CPF, phone or CEP.
    Mask(tools::MaskArgs),

    /// Look up the address of a CEP.
    Cep(tools::CepArgs),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Whether logs should be JSON.
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub async fn run(self, mut config: Config) -> Result<()> {
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }

        let ctx = CommandContext {
            config,
            session: Session::load()?,
            format: OutputFormat::from_flag(&self.format),
        };

        match self.command {
            Commands::Register(args) => account::register(ctx, args).await,
            Commands::Login(args) => account::login(ctx, args).await,
            Commands::Logout => account::logout(ctx).await,
            Commands::Whoami => account::whoami(ctx).await,
            Commands::Book(cmd) => cmd.run(ctx).await,
            Commands::Admin(cmd) => cmd.run(ctx).await,
            Commands::Cpf(args) => tools::cpf(ctx, args).await,
            Commands::Mask(args) => tools::mask(ctx, args).await,
            Commands::Cep(args) => tools::cep(ctx, args).await,
            Commands::Version => {
                println!("barb {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub session: Option<Session>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Get an API client carrying the saved session, if any.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config, self.session.as_ref())
    }

    /// Get a postal lookup client.
    pub fn postal(&self) -> Result<ViaCepClient> {
        Ok(ViaCepClient::new(
            &self.config.postal_url,
            self.config.lookup_timeout(),
        )?)
    }
}
