//! # Definition Validation Rules
//!
//! The fixed rule set applied to every [`VariableDefinition`]:
//!
//! 1. `required` must be present.
//! 2. `secret` must be present.
//! 3. `type` must be present.
//! 4. When `type` is `"enum"`, `values` must be present.
//!
//! Checks run in that order and independently — a missing `required` does
//! not suppress the `secret` check. A missing `type` skips check 4 only,
//! since there is no kind to branch on.
//!
//! The validator is a pure function of its input: no I/O, no mutation, no
//! ordering dependency between variables. Kinds outside the recognized set
//! pass silently; that gap is a property of the checked-in schema contract,
//! not something this layer papers over.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use cfd_core::{VariableDefinition, KIND_ENUM};

use crate::loader::{self, LoadError};

/// One violation of the definition rule set.
///
/// `Display` yields the exact message the CI output contracts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The `required` field is absent.
    MissingRequired,
    /// The `secret` field is absent.
    MissingSecret,
    /// The `type` field is absent.
    MissingType,
    /// The kind is `enum` but the `values` field is absent.
    MissingEnumValues,
}

impl Violation {
    /// The human-readable message for this violation.
    pub fn message(&self) -> &'static str {
        match self {
            Violation::MissingRequired => "Missing 'required' field.",
            Violation::MissingSecret => "Missing 'secret' field.",
            Violation::MissingType => "Missing 'type' field.",
            Violation::MissingEnumValues => "Missing 'values' field for enum.",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Variable name → ordered violations. Clean variables are absent.
pub type ValidationErrorMap = BTreeMap<String, Vec<Violation>>;

/// Validates a set of variable definitions against the fixed rule set.
///
/// Construct with [`DefinitionValidator::new`] for an in-memory map (unit
/// tests) or [`DefinitionValidator::from_repo`] to load every definition
/// source found under a repository root.
#[derive(Debug)]
pub struct DefinitionValidator {
    definitions: BTreeMap<String, VariableDefinition>,
}

impl DefinitionValidator {
    /// Validate a directly supplied definitions map.
    pub fn new(definitions: BTreeMap<String, VariableDefinition>) -> Self {
        Self { definitions }
    }

    /// Load and merge every definition source under `repo_root`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when no sources exist or any source cannot be
    /// read or parsed.
    pub fn from_repo(repo_root: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(loader::load_definitions(repo_root)?))
    }

    /// The definitions under validation.
    pub fn definitions(&self) -> &BTreeMap<String, VariableDefinition> {
        &self.definitions
    }

    /// Run every check on every definition.
    ///
    /// Returns only the variables with at least one violation; an empty map
    /// means the whole schema is valid. Violations within a variable follow
    /// the fixed check order.
    pub fn validation_errors(&self) -> ValidationErrorMap {
        let mut errors = ValidationErrorMap::new();
        for (name, def) in &self.definitions {
            let violations = check_definition(def);
            if !violations.is_empty() {
                errors.insert(name.clone(), violations);
            }
        }
        errors
    }
}

/// Apply the rule set to a single record.
fn check_definition(def: &VariableDefinition) -> Vec<Violation> {
    let mut violations = Vec::new();

    if def.required.is_none() {
        violations.push(Violation::MissingRequired);
    }
    if def.secret.is_none() {
        violations.push(Violation::MissingSecret);
    }
    match def.kind.as_deref() {
        None => violations.push(Violation::MissingType),
        Some(KIND_ENUM) if def.values.is_none() => violations.push(Violation::MissingEnumValues),
        Some(_) => {}
    }

    violations
}
