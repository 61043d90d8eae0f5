//! Bridge from `validator`'s derive output to engine failures.
//!
//! `#[derive(Validate)]` reports codes such as `length` and `range` with
//! `min`/`max`/`equal` params. They are mapped onto the equivalent tags
//! (`min`, `max`, `len`) so one message catalog serves both paths.

use serde_json::Value;

use super::builtin::measure;
use super::{FieldError, ValidationErrors};

/// Convert derive errors, ordered by field name.
pub fn from_derived(errors: &validator::ValidationErrors) -> ValidationErrors {
    let mut converted = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let name: &str = &field;
        for error in field_errors.iter() {
            converted.push(convert(name, error));
        }
    }
    converted.sort_by(|a, b| a.field().cmp(b.field()));
    ValidationErrors::new(converted)
}

fn convert(field: &str, error: &validator::ValidationError) -> FieldError {
    let value = error.params.get("value").cloned().unwrap_or(Value::Null);
    let param = |name: &str| error.params.get(name).map(render_param);

    let code: &str = &error.code;
    let (tag, param) = match code {
        "length" | "range" => {
            if let Some(equal) = param("equal") {
                ("len".to_string(), Some(equal))
            } else {
                let below_min = match (error.params.get("min"), measure(&value)) {
                    (Some(min), Some(size)) => min.as_f64().is_some_and(|min| size < min),
                    _ => false,
                };
                match (below_min, param("min"), param("max")) {
                    (true, min, _) => ("min".to_string(), min),
                    (false, _, Some(max)) => ("max".to_string(), Some(max)),
                    (false, min, None) => ("min".to_string(), min),
                }
            }
        }
        other => (other.to_string(), None),
    };

    FieldError::new(field, tag, param, &value)
}

fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            // `18.0` reads as `18` in messages
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn derive_error(code: &'static str, params: &[(&'static str, Value)]) -> validator::ValidationError {
        let mut error = validator::ValidationError::new(code);
        for (name, value) in params {
            error.add_param(Cow::Borrowed(*name), value);
        }
        error
    }

    #[test]
    fn test_range_below_min_maps_to_min() {
        let error = derive_error(
            "range",
            &[("min", Value::from(18)), ("max", Value::from(200)), ("value", Value::from(6))],
        );
        let converted = convert("age", &error);
        assert_eq!(converted.tag(), "min");
        assert_eq!(converted.param(), Some("18"));
    }

    #[test]
    fn test_range_above_max_maps_to_max() {
        let error = derive_error(
            "range",
            &[("min", Value::from(18)), ("max", Value::from(200)), ("value", Value::from(300))],
        );
        let converted = convert("age", &error);
        assert_eq!(converted.tag(), "max");
        assert_eq!(converted.param(), Some("200"));
    }

    #[test]
    fn test_length_equal_maps_to_len() {
        let error = derive_error("length", &[("equal", Value::from(4)), ("value", Value::from("abc"))]);
        let converted = convert("code", &error);
        assert_eq!(converted.tag(), "len");
        assert_eq!(converted.param(), Some("4"));
    }

    #[test]
    fn test_float_bounds_render_without_fraction() {
        let error = derive_error(
            "range",
            &[("min", Value::from(18.0)), ("value", Value::from(6.0))],
        );
        assert_eq!(convert("age", &error).param(), Some("18"));
    }

    #[test]
    fn test_other_codes_pass_through() {
        let error = derive_error("email", &[("value", Value::from("nope"))]);
        let converted = convert("email", &error);
        assert_eq!(converted.tag(), "email");
        assert_eq!(converted.param(), None);
    }
}
