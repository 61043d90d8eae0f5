//! Locale-specific text rendering handle.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::MessageCatalog;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\d+)\}").unwrap())
}

/// `min-number` is a variant of `min`; `gte-number` is not.
fn is_variant_of(key: &str, tag: &str) -> bool {
    key.strip_prefix(tag)
        .is_some_and(|rest| rest.starts_with('-'))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslatorError {
    #[error("conflicting translation for tag '{key}' in locale '{locale}'")]
    Conflict { key: String, locale: String },
}

/// Message templates for a single locale.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: String,
    templates: HashMap<String, String>,
}

impl Translator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            templates: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Add the template for a tag.
    ///
    /// A tag owns its plain key and every `<tag>-<kind>` variant. Existing
    /// templates for the tag are only replaced when `override_existing` is
    /// set; otherwise the add is rejected. Replacing drops the variants so
    /// the new text applies to every value kind.
    pub fn add(
        &mut self,
        tag: impl Into<String>,
        text: impl Into<String>,
        override_existing: bool,
    ) -> Result<(), TranslatorError> {
        let tag = tag.into();
        if !override_existing && self.covers(&tag) {
            return Err(TranslatorError::Conflict {
                key: tag,
                locale: self.locale.clone(),
            });
        }
        self.templates
            .retain(|key, _| !is_variant_of(key, &tag));
        self.templates.insert(tag, text.into());
        Ok(())
    }

    fn covers(&self, tag: &str) -> bool {
        self.templates
            .keys()
            .any(|key| key == tag || is_variant_of(key, tag))
    }

    /// Load every entry of a built-in catalog, replacing existing templates.
    pub fn load_catalog(&mut self, catalog: &MessageCatalog) {
        for (key, template) in catalog.entries {
            self.templates.insert(key.to_string(), template.to_string());
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render the template for `key`, substituting `{n}` with `params[n]`.
    ///
    /// Placeholders without a matching parameter are left as-is.
    pub fn translate(&self, key: &str, params: &[&str]) -> Option<String> {
        let template = self.templates.get(key)?;
        let rendered = placeholder_regex().replace_all(template, |caps: &regex::Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
                .map(|param| param.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        });
        Some(rendered.into_owned())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
