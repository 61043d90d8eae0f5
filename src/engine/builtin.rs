//! Built-in tags.
//!
//! Format and bound checks delegate to the `validator` crate; the rest are
//! small predicates over JSON values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use validator::{ValidateContains, ValidateEmail, ValidateIp, ValidateLength, ValidateRange, ValidateUrl};

use super::{EngineError, FieldLevel, ValueKind};

static ALPHA_REGEX: OnceLock<Regex> = OnceLock::new();
static ALPHANUM_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Names of every built-in tag.
pub const BUILTIN_TAGS: &[&str] = &[
    "required", "len", "min", "max", "eq", "ne", "gt", "gte", "lt", "lte", "oneof", "contains",
    "excludes", "startswith", "endswith", "email", "url", "ip", "ipv4", "ipv6", "alpha",
    "alphanum", "numeric", "number", "lowercase", "uppercase", "boolean", "json", "datetime",
    "eqfield", "nefield", "gtfield", "gtefield", "ltfield", "ltefield",
];

/// Evaluate a built-in tag. Unknown tags are a misconfiguration.
pub(super) fn check(tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
    match tag {
        "required" => Ok(!level.is_zero()),
        "len" | "min" | "max" | "gt" | "gte" | "lt" | "lte" => bound(tag, level),
        "eq" | "ne" => equality(tag, level),
        "oneof" => one_of(tag, level),
        "contains" => {
            let needle = required_param(tag, level)?;
            Ok(string_value(tag, level)?.validate_contains(needle))
        }
        "excludes" => {
            let needle = required_param(tag, level)?;
            Ok(!string_value(tag, level)?.validate_contains(needle))
        }
        "startswith" => {
            let prefix = required_param(tag, level)?;
            Ok(string_value(tag, level)?.starts_with(prefix))
        }
        "endswith" => {
            let suffix = required_param(tag, level)?;
            Ok(string_value(tag, level)?.ends_with(suffix))
        }
        "email" => Ok(string_value(tag, level)?.validate_email()),
        "url" => Ok(string_value(tag, level)?.validate_url()),
        "ip" => Ok(string_value(tag, level)?.validate_ip()),
        "ipv4" => Ok(string_value(tag, level)?.validate_ipv4()),
        "ipv6" => Ok(string_value(tag, level)?.validate_ipv6()),
        "alpha" => Ok(pattern(&ALPHA_REGEX, r"^[a-zA-Z]+$").is_match(string_value(tag, level)?)),
        "alphanum" => Ok(pattern(&ALPHANUM_REGEX, r"^[a-zA-Z0-9]+$")
            .is_match(string_value(tag, level)?)),
        "numeric" => match level.value() {
            Value::Number(_) => Ok(true),
            _ => Ok(pattern(&NUMERIC_REGEX, r"^[-+]?[0-9]+(?:\.[0-9]+)?$")
                .is_match(string_value(tag, level)?)),
        },
        "number" => match level.value() {
            Value::Number(n) => Ok(n.is_u64()),
            _ => Ok(pattern(&NUMBER_REGEX, r"^[0-9]+$").is_match(string_value(tag, level)?)),
        },
        "lowercase" => {
            let s = string_value(tag, level)?;
            Ok(!s.is_empty() && s == &s.to_lowercase())
        }
        "uppercase" => {
            let s = string_value(tag, level)?;
            Ok(!s.is_empty() && s == &s.to_uppercase())
        }
        "boolean" => match level.value() {
            Value::Bool(_) => Ok(true),
            _ => Ok(matches!(
                string_value(tag, level)?.as_str(),
                "1" | "0" | "t" | "f" | "T" | "F" | "true" | "false" | "TRUE" | "FALSE" | "True"
                    | "False"
            )),
        },
        "json" => Ok(serde_json::from_str::<Value>(string_value(tag, level)?).is_ok()),
        "datetime" => {
            let format = required_param(tag, level)?;
            let s = string_value(tag, level)?;
            Ok(NaiveDateTime::parse_from_str(s, format).is_ok()
                || NaiveDate::parse_from_str(s, format).is_ok()
                || NaiveTime::parse_from_str(s, format).is_ok())
        }
        "eqfield" | "nefield" | "gtfield" | "gtefield" | "ltfield" | "ltefield" => {
            cross_field(tag, level)
        }
        _ => Err(EngineError::UnknownTag(tag.to_string())),
    }
}

/// Size of a value: characters of a string, entries of a collection, or the
/// number itself. Missing values measure as zero.
pub(crate) fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Bool(_) => None,
    }
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap())
}

fn required_param<'a>(tag: &str, level: &FieldLevel<'a>) -> Result<&'a str, EngineError> {
    level.param().ok_or_else(|| EngineError::MissingParam {
        tag: tag.to_string(),
    })
}

fn numeric_param(tag: &str, level: &FieldLevel<'_>) -> Result<f64, EngineError> {
    let param = required_param(tag, level)?;
    param.parse::<f64>().map_err(|_| EngineError::InvalidParam {
        tag: tag.to_string(),
        param: param.to_string(),
    })
}

fn unsupported(tag: &str, kind: ValueKind) -> EngineError {
    EngineError::UnsupportedValue {
        tag: tag.to_string(),
        kind,
    }
}

fn string_value<'a>(tag: &str, level: &FieldLevel<'a>) -> Result<&'a String, EngineError> {
    match level.value() {
        Value::String(s) => Ok(s),
        other => Err(unsupported(tag, ValueKind::of(other))),
    }
}

fn compare(tag: &str, size: f64, bound: f64) -> bool {
    match tag {
        "len" | "eq" => size == bound,
        "ne" => size != bound,
        "min" | "gte" => size >= bound,
        "max" | "lte" => size <= bound,
        "gt" => size > bound,
        "lt" => size < bound,
        _ => false,
    }
}

fn bound(tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
    let limit = numeric_param(tag, level)?;
    match level.value() {
        Value::String(s) if matches!(tag, "len" | "min" | "max") => {
            if limit < 0.0 || limit.fract() != 0.0 {
                return Err(EngineError::InvalidParam {
                    tag: tag.to_string(),
                    param: limit.to_string(),
                });
            }
            let limit = limit as u64;
            Ok(match tag {
                "len" => ValidateLength::<u64>::validate_length(s, None, None, Some(limit)),
                "min" => ValidateLength::<u64>::validate_length(s, Some(limit), None, None),
                _ => ValidateLength::<u64>::validate_length(s, None, Some(limit), None),
            })
        }
        Value::Number(n) => {
            let n = n.as_f64().ok_or_else(|| unsupported(tag, ValueKind::Number))?;
            Ok(match tag {
                "min" | "gte" => ValidateRange::<f64>::validate_range(&n, Some(limit), None, None, None),
                "max" | "lte" => ValidateRange::<f64>::validate_range(&n, None, Some(limit), None, None),
                "gt" => ValidateRange::<f64>::validate_range(&n, None, None, Some(limit), None),
                "lt" => ValidateRange::<f64>::validate_range(&n, None, None, None, Some(limit)),
                _ => compare(tag, n, limit),
            })
        }
        other => {
            let size = measure(other).ok_or_else(|| unsupported(tag, ValueKind::of(other)))?;
            Ok(compare(tag, size, limit))
        }
    }
}

/// `eq`/`ne` compare strings and booleans by value, everything else by size.
fn equality(tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
    let param = required_param(tag, level)?;
    let equal = match level.value() {
        Value::String(s) => s == param,
        Value::Bool(b) => {
            let expected = param.parse::<bool>().map_err(|_| EngineError::InvalidParam {
                tag: tag.to_string(),
                param: param.to_string(),
            })?;
            *b == expected
        }
        other => {
            let limit = numeric_param(tag, level)?;
            let size = measure(other).ok_or_else(|| unsupported(tag, ValueKind::of(other)))?;
            size == limit
        }
    };
    Ok(if tag == "eq" { equal } else { !equal })
}

fn one_of(tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
    let options = required_param(tag, level)?;
    let candidate = match level.value() {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(unsupported(tag, ValueKind::of(other))),
    };
    Ok(options.split_whitespace().any(|option| option == candidate))
}

/// Cross-field tags compare against the explicit comparison value when one
/// was given, otherwise against the sibling named by the parameter.
fn cross_field(tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
    let target = match level.other() {
        Some(other) => Some(other),
        None => level.sibling(required_param(tag, level)?),
    };
    let Some(target) = target else {
        return Ok(tag == "nefield");
    };

    match tag {
        "eqfield" => Ok(level.value() == target),
        "nefield" => Ok(level.value() != target),
        _ => {
            let value = level.value();
            let left = measure(value).ok_or_else(|| unsupported(tag, ValueKind::of(value)))?;
            let right = measure(target).ok_or_else(|| unsupported(tag, ValueKind::of(target)))?;
            Ok(match tag {
                "gtfield" => left > right,
                "gtefield" => left >= right,
                "ltfield" => left < right,
                _ => left <= right,
            })
        }
    }
}
