//! # Terraform Orchestration
//!
//! Runs `terraform init` and `terraform apply` against the configured
//! template directory. State backend selection follows the deploy config:
//! shared remote state via the checked-in backend vars file, or a local
//! backend in dev mode (where the pipeline writes `backend_override.tf`
//! before Terraform ever runs).

use cfd_core::DeployConfig;

use crate::error::SetupError;
use crate::runner::CommandRunner;

/// Initialize the template's working directory.
///
/// With a shared backend, points Terraform at the backend vars file; with a
/// local backend, a plain init picks up the override file instead.
pub fn perform_init(config: &DeployConfig, runner: &impl CommandRunner) -> Result<(), SetupError> {
    let chdir = format!("-chdir={}", config.template_dir.display());
    if config.use_local_backend {
        runner.run("terraform", &[&chdir, "init", "-input=false"])
    } else {
        let backend_config = format!("-backend-config={}", config.backend_vars_filename);
        runner.run("terraform", &[&chdir, "init", "-input=false", &backend_config])
    }
}

/// Initialize and apply the template.
///
/// Applies non-interactively: variable values come from the tfvars files the
/// definition schema drives, never from prompts.
pub fn perform_apply(config: &DeployConfig, runner: &impl CommandRunner) -> Result<(), SetupError> {
    perform_init(config, runner)?;
    tracing::info!(template = %config.template_dir.display(), "applying terraform template");

    let chdir = format!("-chdir={}", config.template_dir.display());
    runner.run(
        "terraform",
        &[&chdir, "apply", "-input=false", "-auto-approve"],
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::runner::mock::RecordingRunner;

    fn config(use_local_backend: bool) -> DeployConfig {
        DeployConfig {
            template_dir: PathBuf::from("cloud/azure/templates/azure_saml_ses"),
            backend_vars_filename: "backend_vars".to_string(),
            use_local_backend,
            resource_group: "civiform-rg".to_string(),
            location: "eastus".to_string(),
            key_vault_name: "civiform-kv".to_string(),
            saml_keystore_account: "civiformsaml".to_string(),
            aws_username: "civiform-ses".to_string(),
        }
    }

    #[test]
    fn apply_initializes_with_the_shared_backend() {
        let runner = RecordingRunner::default();
        perform_apply(&config(false), &runner).unwrap();

        let calls = runner.recorded();
        assert_eq!(
            calls,
            vec![
                "terraform -chdir=cloud/azure/templates/azure_saml_ses init -input=false \
                 -backend-config=backend_vars",
                "terraform -chdir=cloud/azure/templates/azure_saml_ses apply -input=false \
                 -auto-approve",
            ]
        );
    }

    #[test]
    fn local_backend_init_skips_the_backend_config() {
        let runner = RecordingRunner::default();
        perform_init(&config(true), &runner).unwrap();

        let calls = runner.recorded();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].contains("-backend-config"));
    }
}
