//! # cfd-cli — Cloud Deploy Command-Line Interface
//!
//! The `cfd` binary wraps the deploy tooling for CI and operators:
//!
//! - `validate` — check every variable-definition source in the repository;
//!   non-zero exit when any record violates the rule set.
//! - `setup` — provision Azure resources and orchestrate the Terraform
//!   applies for the SAML/SES template.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no validation or
//!   provisioning logic lives here.
//! - `validate` output is a CI contract: one line per violation, the exact
//!   rule-set messages.

pub mod setup;
pub mod validate;
