//! # cfd-setup — Azure Setup Pipeline
//!
//! Provisions the Azure resources the SAML/SES Terraform template depends on
//! and orchestrates the applies around it. The cloud operations themselves
//! live in the deployment repository's shell scripts (`cloud/azure/bin/*`);
//! this crate sequences them.
//!
//! ## Design
//!
//! - **Explicit ordered pipeline.** [`SetupPipeline`] runs named steps in a
//!   fixed order. A step's preconditions are its parameters: anything that
//!   needs the resource group takes a [`ResourceGroup`], and the only way to
//!   obtain one is the step that creates it. There is no mutable "did we do
//!   that yet" state to get out of sync.
//!
//! - **Commands behind a trait.** Every shell invocation goes through
//!   [`CommandRunner`], so tests swap in a recorder and assert the exact
//!   command sequence without touching a cloud.
//!
//! - **Configuration injected.** The pipeline holds a `&DeployConfig`; it
//!   never consults the environment.

pub mod error;
pub mod pipeline;
pub mod runner;
pub mod terraform;

pub use error::SetupError;
pub use pipeline::{
    current_user_id, KeyVaultName, ProvisionedResources, ResourceGroup, SetupPipeline,
};
pub use runner::{CommandRunner, ShellRunner};
