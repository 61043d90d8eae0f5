//! The validator facade.
//!
//! A [`Validator`] pairs one engine with one translator. Every operation
//! reports at most one failure: the first violation, rendered in the
//! validator's locale.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::Config;
use crate::engine::{from_derived, Engine, EngineError, FieldError, FieldRules};
use crate::error::Error;
use crate::i18n::{
    canonical_catalog, catalog_for, CatalogChecker, Locale, MessageCatalog, TranslationMetrics,
    Translator,
};
use crate::registry::RuleSnapshot;
use crate::translate::translate_field_error;

/// Outcome of [`Validator::validate_named_field`] and [`Validator::validate_value`].
#[derive(Debug, Default)]
pub struct ValidateResult {
    field: Option<String>,
    raw: Option<FieldError>,
    error: Option<Error>,
}

impl ValidateResult {
    fn success() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Name of the first failing field.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The untranslated first failure.
    pub fn raw(&self) -> Option<&FieldError> {
        self.raw.as_ref()
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> Result<(), Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Log gaps between a built-in catalog and the canonical one.
fn check_catalog(catalog: &MessageCatalog) {
    let canonical = canonical_catalog();
    if catalog.locale == canonical.locale {
        return;
    }
    let report = CatalogChecker::validate(canonical, catalog);
    for error in &report.errors {
        warn!(locale = catalog.locale, "[validator] {}", error);
    }
    for warning in &report.warnings {
        debug!(locale = catalog.locale, "[validator] {}", warning);
    }
}

/// Validates values and renders failures in one locale.
#[derive(Debug)]
pub struct Validator {
    engine: Engine,
    translator: Translator,
    locale: Locale,
    metrics: TranslationMetrics,
}

impl Validator {
    /// Build a validator for `locale` (or the default locale) with the
    /// custom rules in `rules`.
    pub fn new(locale: Option<&str>, rules: &RuleSnapshot) -> Self {
        Self::with_config(&Config::default(), locale, rules)
    }

    pub fn with_config(config: &Config, locale: Option<&str>, rules: &RuleSnapshot) -> Self {
        let requested = locale
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .unwrap_or(config.default_locale.as_str());
        let locale = Locale::resolve(requested, &config.default_locale);

        let mut translator = Translator::new(locale.code());
        match catalog_for(locale.requested()).or_else(|| catalog_for(locale.code())) {
            Some(catalog) => {
                check_catalog(catalog);
                translator.load_catalog(catalog);
            }
            None => warn!(
                locale = locale.requested(),
                "[validator] no built-in translations for locale"
            ),
        }

        let mut engine = Engine::new();
        for rule in rules.iter() {
            engine.register_validation(rule.tag(), rule.func().clone(), rule.call_if_null());

            let translation = rule
                .translation_for(locale.requested())
                .or_else(|| rule.translation_for(locale.code()));
            let Some(translation) = translation else {
                continue;
            };

            let report = CatalogChecker::validate_template(&translation.text);
            for warning in &report.warnings {
                debug!(tag = rule.tag(), "[validator] {}", warning);
            }
            if let Err(err) =
                translator.add(rule.tag(), translation.text.as_str(), translation.override_existing)
            {
                warn!(tag = rule.tag(), error = %err, "[validator] custom translation skipped");
            }
        }

        debug!(
            locale = locale.requested(),
            resolved = locale.code(),
            custom_rules = rules.len(),
            templates = translator.len(),
            "[validator] created"
        );

        Self {
            engine,
            translator,
            locale,
            metrics: TranslationMetrics::new(),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Validate every tagged field of `value`.
    pub fn validate_struct<T>(&self, value: &T) -> Result<(), Error>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.finish(self.engine.validate_struct(value))
    }

    /// Validate every tagged field except `fields`.
    pub fn validate_struct_except<T>(&self, value: &T, fields: &[&str]) -> Result<(), Error>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.finish(self.engine.validate_struct_except(value, fields))
    }

    /// Validate only `fields`.
    pub fn validate_struct_partial<T>(&self, value: &T, fields: &[&str]) -> Result<(), Error>
    where
        T: Serialize + FieldRules + ?Sized,
    {
        self.finish(self.engine.validate_struct_partial(value, fields))
    }

    /// Validate the tagged fields for which `skip` returns false.
    pub fn validate_struct_filtered<T, F>(&self, value: &T, skip: F) -> Result<(), Error>
    where
        T: Serialize + FieldRules + ?Sized,
        F: Fn(&str) -> bool,
    {
        self.finish(self.engine.validate_struct_filtered(value, skip))
    }

    /// Validate one value against an ad-hoc rule, e.g. `"gte=1,lte=10"`.
    pub fn validate_field<V>(&self, value: &V, rule: &str) -> Result<(), Error>
    where
        V: Serialize + ?Sized,
    {
        self.finish(self.engine.validate_var(value, rule))
    }

    /// Validate `value` against `other`, e.g. with `"eqfield"`.
    pub fn validate_field_against<V, O>(&self, value: &V, other: &O, rule: &str) -> Result<(), Error>
    where
        V: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        self.finish(self.engine.validate_var_with_value(value, other, rule))
    }

    /// Validate a named form value. An empty rule always passes.
    pub fn validate_named_field<V>(&self, name: &str, value: &V, rule: &str) -> ValidateResult
    where
        V: Serialize + ?Sized,
    {
        if rule.trim().is_empty() {
            return ValidateResult::success();
        }
        let mut result = self.outcome(self.engine.validate_named_var(name, value, rule));
        if result.raw.is_some() {
            result.field = Some(name.to_string());
        }
        result
    }

    /// Validate `fields` of a struct, or every tagged field when `fields`
    /// is empty.
    pub fn validate_value<T>(&self, value: &T, fields: &[&str]) -> ValidateResult
    where
        T: Serialize + FieldRules + ?Sized,
    {
        if fields.is_empty() {
            self.outcome(self.engine.validate_struct(value))
        } else {
            self.outcome(self.engine.validate_struct_partial(value, fields))
        }
    }

    /// Validate map entries against per-key rules. Returns one error per
    /// failing key.
    pub fn validate_map(
        &self,
        data: &Map<String, Value>,
        rules: &BTreeMap<String, String>,
    ) -> BTreeMap<String, Error> {
        self.metrics.record_validation();
        self.engine
            .validate_map(data, rules)
            .into_iter()
            .map(|(key, error)| {
                if error.is_validation() {
                    self.metrics.record_failure();
                }
                (key, self.translate(error))
            })
            .collect()
    }

    /// Validate a struct that derives `validator::Validate`.
    pub fn validate_derived<T>(&self, value: &T) -> Result<(), Error>
    where
        T: validator::Validate,
    {
        let outcome = value
            .validate()
            .map_err(|errors| EngineError::Validation(from_derived(&errors)));
        self.finish(outcome)
    }

    /// Render an engine error: rule violations become the localized message
    /// of the first violation, anything else passes through unchanged.
    pub fn translate(&self, error: EngineError) -> Error {
        match error {
            EngineError::Validation(errors) => match errors.into_first() {
                Some(first) => Error::Invalid(self.message_for(&first)),
                None => Error::Engine(EngineError::Validation(Default::default())),
            },
            other => Error::Engine(other),
        }
    }

    fn message_for(&self, error: &FieldError) -> String {
        let message = translate_field_error(&self.translator, error);
        if message.is_fallback() {
            self.metrics.record_fallback();
        } else {
            self.metrics.record_translated();
        }
        message.into_string()
    }

    fn finish(&self, outcome: Result<(), EngineError>) -> Result<(), Error> {
        self.metrics.record_validation();
        outcome.map_err(|error| {
            if error.is_validation() {
                self.metrics.record_failure();
            }
            self.translate(error)
        })
    }

    fn outcome(&self, outcome: Result<(), EngineError>) -> ValidateResult {
        self.metrics.record_validation();
        match outcome {
            Ok(()) => ValidateResult::success(),
            Err(EngineError::Validation(errors)) => {
                self.metrics.record_failure();
                match errors.into_first() {
                    Some(first) => ValidateResult {
                        field: Some(first.field().to_string()),
                        error: Some(Error::Invalid(self.message_for(&first))),
                        raw: Some(first),
                    },
                    None => ValidateResult {
                        error: Some(Error::Engine(EngineError::Validation(Default::default()))),
                        ..Default::default()
                    },
                }
            }
            Err(other) => ValidateResult {
                error: Some(Error::Engine(other)),
                ..Default::default()
            },
        }
    }
}
