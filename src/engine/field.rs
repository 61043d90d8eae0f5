use serde_json::{Map, Value};

use super::ValueKind;

/// Context handed to every rule function.
#[derive(Debug, Clone, Copy)]
pub struct FieldLevel<'a> {
    field: &'a str,
    value: &'a Value,
    param: Option<&'a str>,
    parent: Option<&'a Map<String, Value>>,
    other: Option<&'a Value>,
}

impl<'a> FieldLevel<'a> {
    pub(crate) fn new(
        field: &'a str,
        value: &'a Value,
        param: Option<&'a str>,
        parent: Option<&'a Map<String, Value>>,
        other: Option<&'a Value>,
    ) -> Self {
        Self {
            field,
            value,
            param,
            parent,
            other,
        }
    }

    /// Name of the field under validation.
    pub fn field_name(&self) -> &'a str {
        self.field
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Parameter of the tag being evaluated (`18` in `min=18`).
    pub fn param(&self) -> Option<&'a str> {
        self.param
    }

    /// The object that contains the field, when validating a struct or map.
    pub fn parent(&self) -> Option<&'a Map<String, Value>> {
        self.parent
    }

    /// The comparison value passed to a two-value check.
    pub fn other(&self) -> Option<&'a Value> {
        self.other
    }

    /// Look up a sibling field on the parent object.
    pub fn sibling(&self, name: &str) -> Option<&'a Value> {
        self.parent.and_then(|parent| parent.get(name))
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self.value)
    }

    pub fn is_zero(&self) -> bool {
        is_zero(self.value)
    }
}

/// Zero value of a JSON value: `null`, `""`, `0`, `false`, `[]` or `{}`.
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_zero() {
        for zero in [json!(null), json!(""), json!(0), json!(0.0), json!(false), json!([]), json!({})] {
            assert!(is_zero(&zero), "{} should be zero", zero);
        }
        for non_zero in [json!("a"), json!(1), json!(-0.5), json!(true), json!([0]), json!({"a": null})] {
            assert!(!is_zero(&non_zero), "{} should not be zero", non_zero);
        }
    }

    #[test]
    fn test_sibling_lookup() {
        let parent = json!({"Password": "secret", "Confirm": "secret"});
        let map = parent.as_object().unwrap();
        let value = &map["Confirm"];
        let level = FieldLevel::new("Confirm", value, Some("Password"), Some(map), None);

        assert_eq!(level.sibling("Password"), Some(&json!("secret")));
        assert_eq!(level.sibling("Missing"), None);
        assert_eq!(level.kind(), ValueKind::String);
    }
}
