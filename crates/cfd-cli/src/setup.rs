//! # Setup Subcommand
//!
//! Runs the full deployment setup: pre-Terraform provisioning, the first
//! apply, the manual-inputs post phase, and cleanup. The post phase can be
//! skipped for templates that are being re-applied without new ADFS
//! credentials.

use std::path::PathBuf;

use clap::Args;

use cfd_core::DeployConfig;
use cfd_setup::{current_user_id, SetupPipeline, ShellRunner};

/// Arguments for the setup subcommand.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Path to the deploy configuration file (JSON or YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Skip the manual ADFS secret inputs and the second apply.
    #[arg(long)]
    pub skip_post_terraform: bool,
}

/// Run the setup subcommand.
pub fn run(args: &SetupArgs) -> anyhow::Result<()> {
    let config = DeployConfig::from_file(&args.config)?;
    let runner = ShellRunner;

    let user = current_user_id(&runner)?;
    tracing::info!(user = %user, resource_group = %config.resource_group, "starting setup");

    let pipeline = SetupPipeline::new(&config, &runner);
    let resources = pipeline.pre_terraform_setup()?;
    pipeline.apply()?;

    if args.skip_post_terraform {
        tracing::info!("skipping post-terraform setup");
    } else {
        pipeline.post_terraform_setup(&resources)?;
    }

    pipeline.cleanup()?;
    tracing::info!("setup complete");
    Ok(())
}
