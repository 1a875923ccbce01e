//! # cfd CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// CiviForm cloud deploy tools.
///
/// Validates the repository's variable-definition schema and runs the Azure
/// SAML/SES template setup.
#[derive(Parser, Debug)]
#[command(name = "cfd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate every variable-definition source in the repository.
    Validate(cfd_cli::validate::ValidateArgs),
    /// Provision Azure resources and apply the Terraform template.
    Setup(cfd_cli::setup::SetupArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => cfd_cli::validate::run(&args),
        Commands::Setup(args) => cfd_cli::setup::run(&args),
    }
}
