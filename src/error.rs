//! Validation diagnostics
//!
//! A load either produces a configuration or a [`Diagnostics`] batch holding
//! every violation found in the document.

use serde::Serialize;
use std::fmt;

/// A single validation failure, named after the document key it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigError {
    /// Value has the wrong type, or the key is not recognized in strict mode.
    #[error("{field}: expected {expected}, found {found}")]
    Schema { field: String, expected: String, found: String },

    /// Value has the right type but lies outside its allowed range.
    #[error("{field}: value {value} violates bound {bound}")]
    Domain { field: String, value: String, bound: String },

    /// Two individually valid fields do not agree with each other.
    #[error("{field} is incompatible with {other}: {reason}")]
    Compatibility { field: String, other: String, reason: String },

    /// Required key absent from the document.
    #[error("{field}: required field is missing")]
    MissingField { field: String },

    /// A `dir::` reference could not be resolved against the base directory.
    #[error("{field}: cannot resolve reference '{reference}': {reason}")]
    UnresolvedReference { field: String, reference: String, reason: String },
}

impl ConfigError {
    pub fn schema(field: &str, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Schema { field: field.to_string(), expected: expected.into(), found: found.into() }
    }

    pub fn domain(field: &str, value: impl fmt::Display, bound: impl Into<String>) -> Self {
        Self::Domain { field: field.to_string(), value: value.to_string(), bound: bound.into() }
    }

    pub fn compatibility(field: &str, other: &str, reason: impl Into<String>) -> Self {
        Self::Compatibility {
            field: field.to_string(),
            other: other.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingField { field: field.to_string() }
    }

    /// The primary document key this error is about.
    pub fn field(&self) -> &str {
        match self {
            Self::Schema { field, .. }
            | Self::Domain { field, .. }
            | Self::Compatibility { field, .. }
            | Self::MissingField { field }
            | Self::UnresolvedReference { field, .. } => field,
        }
    }

    /// Short kind label used in CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "schema",
            Self::Domain { .. } => "domain",
            Self::Compatibility { .. } => "compatibility",
            Self::MissingField { .. } => "missing-field",
            Self::UnresolvedReference { .. } => "unresolved-reference",
        }
    }
}

/// Every violation found by one load call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Diagnostics {
    errors: Vec<ConfigError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ConfigError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigError> {
        self.errors.iter()
    }

    /// Returns `true` if any error names `field` as its primary key.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "configuration has {} {}", self.errors.len(), noun)?;
        for error in &self.errors {
            write!(f, "\n  [{}] {}", error.kind(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ConfigError;
    type IntoIter = std::slice::Iter<'a, ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_error() {
        let mut diags = Diagnostics::new();
        diags.push(ConfigError::missing("DESIGN_NAME"));
        diags.push(ConfigError::domain("PL_TARGET_DENSITY", 1.5, "(0, 1]"));

        let text = diags.to_string();
        assert!(text.starts_with("configuration has 2 errors"));
        assert!(text.contains("[missing-field] DESIGN_NAME: required field is missing"));
        assert!(text.contains("[domain] PL_TARGET_DENSITY: value 1.5 violates bound (0, 1]"));
    }

    #[test]
    fn test_field_and_mentions() {
        let mut diags = Diagnostics::new();
        diags.push(ConfigError::compatibility("STD_CELL_LIBRARY", "PDK", "not offered"));
        assert_eq!(diags.errors()[0].field(), "STD_CELL_LIBRARY");
        assert!(diags.mentions("STD_CELL_LIBRARY"));
        assert!(!diags.mentions("PDK"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = ConfigError::missing("PDK");
        let value = serde_json::to_value(&err).expect("serialize");
        assert_eq!(value["kind"], "missing_field");
        assert_eq!(value["field"], "PDK");
    }
}
