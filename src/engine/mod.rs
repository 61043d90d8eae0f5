//! Tag engine: evaluates tag expressions against serialized values.
//!
//! Values are serialized to [`serde_json::Value`] first, so anything that
//! implements `Serialize` can be validated. Struct rules come from the
//! [`FieldRules`] trait, keyed by serialized field name.

mod builtin;
mod derived;
mod error;
mod expr;
mod field;

pub use builtin::BUILTIN_TAGS;
pub use derived::from_derived;
pub use error::{EngineError, FieldError, ValidationErrors, ValueKind};
pub use expr::{Clause, RuleExpr, Tag};
pub use field::{is_zero, FieldLevel};

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A custom rule function.
pub type RuleFn = Arc<dyn Fn(&FieldLevel<'_>) -> bool + Send + Sync>;

/// Tag expressions for each field of a struct, in evaluation order.
///
/// Field names are the serialized names, so `#[serde(rename)]` applies.
///
/// ```ignore
/// impl FieldRules for SignUp {
///     fn field_rules() -> &'static [(&'static str, &'static str)] {
///         &[("Name", "required"), ("Age", "required,min=18,max=200")]
///     }
/// }
/// ```
pub trait FieldRules {
    fn field_rules() -> &'static [(&'static str, &'static str)];
}

#[derive(Clone)]
struct CustomRule {
    func: RuleFn,
    call_if_null: bool,
}

/// The rules engine. Holds custom rules on top of the built-in tags.
#[derive(Clone, Default)]
pub struct Engine {
    custom: HashMap<String, CustomRule>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Engine").field("custom", &tags).finish()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a custom tag. Custom tags shadow built-ins.
    ///
    /// When `call_if_null` is false the function is not called for empty
    /// values and the tag passes.
    pub fn register_validation(&mut self, tag: impl Into<String>, func: RuleFn, call_if_null: bool) {
        self.custom
            .insert(tag.into(), CustomRule { func, call_if_null });
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.custom.contains_key(tag) || BUILTIN_TAGS.contains(&tag)
    }

    /// Validate every tagged field.
    pub fn validate_struct<T>(&self, value: &T) -> Result<(), EngineError>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.validate_fields(value, |_| true)
    }

    /// Validate every tagged field except the named ones.
    pub fn validate_struct_except<T>(&self, value: &T, fields: &[&str]) -> Result<(), EngineError>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.validate_fields(value, |name| !fields.contains(&name))
    }

    /// Validate only the named fields.
    pub fn validate_struct_partial<T>(&self, value: &T, fields: &[&str]) -> Result<(), EngineError>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.validate_fields(value, |name| fields.contains(&name))
    }

    /// Validate the tagged fields for which `skip` returns false.
    pub fn validate_struct_filtered<T, F>(&self, value: &T, skip: F) -> Result<(), EngineError>
    where
        T: Serialize + FieldRules + ?Sized,
        F: Fn(&str) -> bool,
    {
        self.validate_fields(value, |name| !skip(name))
    }

    /// Validate a single anonymous value, e.g. `validate_var(&5, "gte=1,lte=10")`.
    pub fn validate_var<V>(&self, value: &V, rule: &str) -> Result<(), EngineError>
    where
        V: Serialize + ?Sized,
    {
        self.validate_named_var("", value, rule)
    }

    /// Like [`Engine::validate_var`], reporting failures under `name`.
    pub fn validate_named_var<V>(&self, name: &str, value: &V, rule: &str) -> Result<(), EngineError>
    where
        V: Serialize + ?Sized,
    {
        let expr = RuleExpr::parse(rule)?;
        let value = serde_json::to_value(value)?;
        match self.evaluate(name, &value, &expr, None, None)? {
            Some(error) => Err(EngineError::Validation(error.into())),
            None => Ok(()),
        }
    }

    /// Validate `value` against `other` with a cross-field tag such as `eqfield`.
    pub fn validate_var_with_value<V, O>(&self, value: &V, other: &O, rule: &str) -> Result<(), EngineError>
    where
        V: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let expr = RuleExpr::parse(rule)?;
        let value = serde_json::to_value(value)?;
        let other = serde_json::to_value(other)?;
        match self.evaluate("", &value, &expr, None, Some(&other))? {
            Some(error) => Err(EngineError::Validation(error.into())),
            None => Ok(()),
        }
    }

    /// Validate map entries against per-key tag expressions.
    ///
    /// Returns one error per failing key; keys missing from `data` are
    /// validated as `null`.
    pub fn validate_map(
        &self,
        data: &Map<String, Value>,
        rules: &BTreeMap<String, String>,
    ) -> BTreeMap<String, EngineError> {
        let mut failures = BTreeMap::new();
        for (key, rule) in rules {
            let value = data.get(key).unwrap_or(&Value::Null);
            let outcome = RuleExpr::parse(rule)
                .and_then(|expr| self.evaluate(key, value, &expr, Some(data), None));
            match outcome {
                Ok(None) => {}
                Ok(Some(error)) => {
                    failures.insert(key.clone(), EngineError::Validation(error.into()));
                }
                Err(error) => {
                    failures.insert(key.clone(), error);
                }
            }
        }
        failures
    }

    fn validate_fields<T, F>(&self, value: &T, include: F) -> Result<(), EngineError>
    where
        T: Serialize + FieldRules + ?Sized,
        F: Fn(&str) -> bool,
    {
        let root = match serde_json::to_value(value)? {
            Value::Object(map) => map,
            other => return Err(EngineError::NotAStruct(ValueKind::of(&other))),
        };

        let mut errors = Vec::new();
        for (field, rule) in T::field_rules() {
            if !include(field) {
                continue;
            }
            let expr = RuleExpr::parse(rule)?;
            let current = root.get(*field).unwrap_or(&Value::Null);
            if let Some(error) = self.evaluate(field, current, &expr, Some(&root), None)? {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(ValidationErrors::new(errors)))
        }
    }

    /// Evaluate one expression; stops at the first failing clause.
    fn evaluate(
        &self,
        field: &str,
        value: &Value,
        expr: &RuleExpr,
        parent: Option<&Map<String, Value>>,
        other: Option<&Value>,
    ) -> Result<Option<FieldError>, EngineError> {
        if expr.is_skip() {
            return Ok(None);
        }

        let empty = is_zero(value);
        for clause in expr.clauses() {
            let tags = match clause {
                Clause::OmitEmpty if empty => return Ok(None),
                Clause::OmitEmpty => continue,
                Clause::AnyOf(tags) => tags,
            };

            let mut passed = false;
            for tag in tags {
                let level = FieldLevel::new(field, value, tag.param.as_deref(), parent, other);
                if self.check(&tag.name, &level)? {
                    passed = true;
                    break;
                }
            }
            if !passed {
                return Ok(Some(FieldError::new(field, clause.tag(), clause.param(), value)));
            }
        }
        Ok(None)
    }

    fn check(&self, tag: &str, level: &FieldLevel<'_>) -> Result<bool, EngineError> {
        match self.custom.get(tag) {
            Some(rule) if !rule.call_if_null && level.is_zero() => Ok(true),
            Some(rule) => Ok((rule.func)(level)),
            None => builtin::check(tag, level),
        }
    }
}
