//! # cfd-core — Foundational Types for the Cloud Deploy Tools
//!
//! This crate is the bedrock of the CiviForm cloud deploy tooling. It defines
//! the data model shared by the validator, the setup pipeline, and the CLI.
//! Every other crate in the workspace depends on `cfd-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Absence is a first-class state.** A [`VariableDefinition`] models
//!    every declared field as an `Option`, so "the source never mentioned
//!    `secret`" is distinct from "the source set `secret: false`". The
//!    validator reports on absence; it never guesses a default.
//!
//! 2. **Configuration is injected, never ambient.** [`DeployConfig`] is an
//!    explicit struct handed to the components that need it at construction
//!    time. There are no global lookups and no environment-variable reads
//!    buried inside library code.
//!
//! 3. **No `panic!()` or `.unwrap()` outside tests.** Fallible operations
//!    return `Result` with `thiserror`-derived error types.

pub mod config;
pub mod definition;

pub use config::{ConfigError, DeployConfig};
pub use definition::{VariableDefinition, KIND_ENUM, RECOGNIZED_KINDS};
