//! Raw failures produced by the tag engine.

use serde_json::Value;
use std::fmt;

/// JSON kind of a validated value.
///
/// Translation uses the kind to pick a message variant, e.g. `min` on a
/// string talks about length while `min` on a number talks about magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Suffix used for kind-specific message keys (`min-string`, `min-items`).
    pub fn message_suffix(&self) -> &'static str {
        match self {
            ValueKind::Array | ValueKind::Object => "items",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule violation tied to one field and one tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    field: String,
    tag: String,
    param: Option<String>,
    kind: ValueKind,
    value: Value,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        tag: impl Into<String>,
        param: Option<String>,
        value: &Value,
    ) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
            param,
            kind: ValueKind::of(value),
            value: value.clone(),
        }
    }

    /// Name of the offending field (empty for anonymous single-value checks).
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The tag that failed, e.g. `min` or `rgb|rgba`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The tag parameter, e.g. `18` for `min=18`.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Untranslated default description.
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.field, self.field, self.tag
        )
    }
}

impl std::error::Error for FieldError {}

/// All violations from one validation call, in rule declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn into_first(self) -> Option<FieldError> {
        self.0.into_iter().next()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// Everything the engine can report.
///
/// Only [`EngineError::Validation`] is a user-facing failure; every other
/// variant is a misconfiguration of the rules or the validated value.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("undefined validation function '{0}'")]
    UnknownTag(String),

    #[error("invalid rule expression '{expression}': {reason}")]
    InvalidRule { expression: String, reason: String },

    #[error("invalid parameter '{param}' for tag '{tag}'")]
    InvalidParam { tag: String, param: String },

    #[error("tag '{tag}' requires a parameter")]
    MissingParam { tag: String },

    #[error("tag '{tag}' cannot be applied to a {kind} value")]
    UnsupportedValue { tag: String, kind: ValueKind },

    #[error("expected a struct-like value, got {0}")]
    NotAStruct(ValueKind),

    #[error("failed to serialize value for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether this error is a rule violation rather than a misconfiguration.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}
