//! # cfd-schema — Variable Definition Validation
//!
//! Checks the repository-wide variable-definition schema for consistency.
//! Definition sources are declarative files (`variable_definitions.json` or
//! `.yaml`) that describe, per configuration variable, whether it is
//! required, whether it is secret, what kind of value it holds, and (for
//! enums) which values are allowed.
//!
//! ## Validation (`validate`)
//!
//! [`DefinitionValidator`] runs a fixed rule set over every record and
//! returns a map of variable name → ordered violation list. It accumulates:
//! a malformed record is reported, never thrown, and never stops the other
//! checks or the other variables. An empty map means the schema is valid —
//! CI treats anything else as a hard failure.
//!
//! ## Source Loading (`loader`)
//!
//! [`loader::load_definitions`] walks a repository root, finds every
//! definition source, and merges them into a single map. Loading failures
//! (unreadable file, parse error, no sources at all) are fatal, because
//! validation cannot proceed without input.

pub mod loader;
pub mod validate;

pub use loader::{load_definitions, LoadError};
pub use validate::{DefinitionValidator, ValidationErrorMap, Violation};
