//! # Validate Subcommand
//!
//! Loads every variable-definition source under the repository root and
//! applies the rule set. Prints one line per violation and fails the
//! process when the error map is non-empty, so CI can gate on it directly.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use cfd_schema::DefinitionValidator;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Repository root to scan for variable-definition sources.
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,
}

/// Run the validate subcommand.
pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let validator = DefinitionValidator::from_repo(&args.repo_root)?;
    let total = validator.definitions().len();
    let errors = validator.validation_errors();

    if errors.is_empty() {
        tracing::info!(total, "all variable definitions are valid");
        return Ok(());
    }

    for (name, violations) in &errors {
        for violation in violations {
            eprintln!("{name}: {violation}");
        }
    }
    bail!(
        "{} of {total} variable definitions failed validation",
        errors.len()
    );
}
