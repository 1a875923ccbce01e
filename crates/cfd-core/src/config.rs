//! # Deploy Configuration
//!
//! [`DeployConfig`] carries everything the setup pipeline needs to provision
//! a deployment: resource names, locations, the template directory, and the
//! backend mode. It is loaded once at the CLI boundary and passed down
//! explicitly — library code never reaches into the environment or any
//! global registry for a setting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a deploy configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file '{path}': {reason}")]
    Unreadable {
        /// Path to the config file.
        path: String,
        /// Underlying IO failure.
        reason: String,
    },

    /// The file contents could not be parsed.
    #[error("cannot parse config file '{path}': {reason}")]
    Parse {
        /// Path to the config file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported config format for '{path}': expected .json, .yaml, or .yml")]
    UnsupportedFormat {
        /// Path to the config file.
        path: String,
    },
}

/// Configuration for one deployment of the Azure SAML/SES template.
///
/// Field names match the keys of the checked-in config file. Resource names
/// refer to Azure unless prefixed otherwise; `aws_username` identifies the
/// IAM user whose SES credentials are synced into the key vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Directory holding the Terraform template to apply.
    pub template_dir: PathBuf,

    /// Filename (within `template_dir`) of the backend variables file.
    pub backend_vars_filename: String,

    /// Use a local Terraform backend instead of shared remote state.
    ///
    /// Dev-mode only: skips shared-state provisioning and writes a
    /// `backend_override.tf` into the template directory.
    #[serde(default)]
    pub use_local_backend: bool,

    /// Name of the resource group that owns every provisioned resource.
    pub resource_group: String,

    /// Region the resource group is created in, e.g. `"eastus"`.
    pub location: String,

    /// Name of the key vault that receives all deployment secrets.
    pub key_vault_name: String,

    /// Storage account that holds the SAML keystore.
    pub saml_keystore_account: String,

    /// AWS IAM username whose SES credentials are synced to the key vault.
    pub aws_username: String,
}

impl DeployConfig {
    /// Load a configuration from a JSON or YAML file, dispatching on the
    /// file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] if the file cannot be read,
    /// [`ConfigError::Parse`] if its contents are malformed, and
    /// [`ConfigError::UnsupportedFormat`] for unknown extensions.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Full path of the backend variables file inside the template directory.
    pub fn backend_vars_file(&self) -> PathBuf {
        self.template_dir.join(&self.backend_vars_filename)
    }
}
