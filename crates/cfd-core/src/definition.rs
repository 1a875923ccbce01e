//! # Variable Definition Records
//!
//! One [`VariableDefinition`] describes the validation contract of a single
//! deployment configuration variable: whether deployers must set it, whether
//! its value is a secret, what kind of value it holds, and (for enums) which
//! values are allowed.
//!
//! Definition sources are declarative files checked into the deployment
//! repository. Authors edit them by hand, so a record may be missing any
//! field — every field here is an `Option`, and absence is reported by the
//! validator in `cfd-schema` rather than papered over with defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind string for string-valued variables.
pub const KIND_STRING: &str = "string";
/// Kind string for integer-valued variables.
pub const KIND_INTEGER: &str = "integer";
/// Kind string for float-valued variables.
pub const KIND_FLOAT: &str = "float";
/// Kind string for boolean variables.
pub const KIND_BOOL: &str = "bool";
/// Kind string for enum variables; these must also declare `values`.
pub const KIND_ENUM: &str = "enum";
/// Kind string for list-of-strings variables.
pub const KIND_LIST_OF_STRINGS: &str = "list_of_strings";

/// The kinds a definition source is expected to declare.
///
/// The validator does not reject kinds outside this set — an unrecognized
/// kind passes silently. This list exists for documentation and tooling.
pub const RECOGNIZED_KINDS: &[&str] = &[
    KIND_STRING,
    KIND_INTEGER,
    KIND_FLOAT,
    KIND_BOOL,
    KIND_ENUM,
    KIND_LIST_OF_STRINGS,
];

/// The declared validation contract for one configuration variable.
///
/// All fields are optional at the type level because definition sources are
/// hand-edited; which fields are mandatory is the validator's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Whether deployers must supply a value for this variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Whether the value is sensitive and must live in the key vault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,

    /// The kind of value this variable holds, e.g. `"string"` or `"enum"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Allowed values; meaningful only when `kind` is `"enum"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// Whether the variable is forwarded to Terraform as a tfvar.
    ///
    /// Carried through (de)serialization but never validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfvar: Option<bool>,

    /// Any other fields a source declares, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VariableDefinition {
    /// True when the declared kind is `"enum"`.
    pub fn is_enum(&self) -> bool {
        self.kind.as_deref() == Some(KIND_ENUM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_enum_record() {
        let json = r#"{
            "required": true,
            "secret": false,
            "type": "enum",
            "values": ["aws", "azure"],
            "tfvar": true
        }"#;
        let def: VariableDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.required, Some(true));
        assert_eq!(def.secret, Some(false));
        assert!(def.is_enum());
        assert_eq!(
            def.values,
            Some(vec!["aws".to_string(), "azure".to_string()])
        );
        assert_eq!(def.tfvar, Some(true));
        assert!(def.extra.is_empty());
    }

    #[test]
    fn absent_fields_deserialize_to_none() {
        let def: VariableDefinition = serde_json::from_str("{}").unwrap();
        assert_eq!(def.required, None);
        assert_eq!(def.secret, None);
        assert_eq!(def.kind, None);
        assert_eq!(def.values, None);
        assert!(!def.is_enum());
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let json = r#"{
            "required": true,
            "secret": false,
            "type": "string",
            "description": "Display name of the deployment."
        }"#;
        let def: VariableDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(
            def.extra.get("description").and_then(|v| v.as_str()),
            Some("Display name of the deployment.")
        );
    }

    #[test]
    fn yaml_sources_deserialize_the_same_way() {
        let yaml = "required: true\nsecret: true\ntype: string\n";
        let def: VariableDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.required, Some(true));
        assert_eq!(def.secret, Some(true));
        assert_eq!(def.kind.as_deref(), Some(KIND_STRING));
    }

    #[test]
    fn recognized_kinds_include_enum() {
        assert!(RECOGNIZED_KINDS.contains(&KIND_ENUM));
    }
}
