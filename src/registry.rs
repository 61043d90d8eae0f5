//! Rule registry: custom tags available to validators built from it.
//!
//! Register rules at startup, then take a [`RuleSnapshot`] for each
//! validator. Validators never see registrations made after their snapshot.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

use crate::engine::{FieldLevel, RuleFn};
use crate::i18n::{base_language, normalize_locale};

/// A localized message template for a custom tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Template text; `{0}` is the field name, `{1}` the tag parameter
    pub text: String,

    /// Replace an existing template for the same tag and locale
    pub override_existing: bool,
}

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            override_existing: false,
        }
    }

    /// A translation that replaces any existing template.
    pub fn overriding(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            override_existing: true,
        }
    }
}

/// Options for [`RuleRegistry::register`].
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    call_if_null: bool,
    translations: HashMap<String, Translation>,
}

impl RuleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the rule even when the value is empty.
    pub fn call_if_null(mut self, call_if_null: bool) -> Self {
        self.call_if_null = call_if_null;
        self
    }

    pub fn translation(mut self, locale: &str, text: impl Into<String>) -> Self {
        self.translations
            .insert(normalize_locale(locale), Translation::new(text));
        self
    }

    pub fn translation_override(mut self, locale: &str, text: impl Into<String>) -> Self {
        self.translations
            .insert(normalize_locale(locale), Translation::overriding(text));
        self
    }

    pub fn translations<K, I>(mut self, translations: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Translation)>,
    {
        for (locale, translation) in translations {
            self.translations
                .insert(normalize_locale(locale.as_ref()), translation);
        }
        self
    }
}

/// A registered custom tag.
#[derive(Clone)]
pub struct RuleRegistration {
    tag: String,
    func: RuleFn,
    call_if_null: bool,
    translations: HashMap<String, Translation>,
}

impl fmt::Debug for RuleRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistration")
            .field("tag", &self.tag)
            .field("call_if_null", &self.call_if_null)
            .field("translations", &self.translations)
            .finish_non_exhaustive()
    }
}

impl RuleRegistration {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn func(&self) -> &RuleFn {
        &self.func
    }

    pub fn call_if_null(&self) -> bool {
        self.call_if_null
    }

    pub fn translations(&self) -> &HashMap<String, Translation> {
        &self.translations
    }

    /// Translation for a locale, falling back to its base language.
    pub fn translation_for(&self, locale: &str) -> Option<&Translation> {
        let locale = normalize_locale(locale);
        self.translations.get(&locale).or_else(|| {
            base_language(&locale).and_then(|base| self.translations.get(base))
        })
    }
}

/// Mutable set of custom tags.
///
/// Registering a tag that already exists replaces the earlier entry.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: RwLock<HashMap<String, Arc<RuleRegistration>>>,
}

/// Process-wide registry (initialized lazily)
static GLOBAL: OnceLock<RuleRegistry> = OnceLock::new();

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry for applications that prefer one shared set.
    pub fn global() -> &'static RuleRegistry {
        GLOBAL.get_or_init(RuleRegistry::new)
    }

    /// Register a custom tag, replacing any earlier registration.
    pub fn register<F>(&self, tag: impl Into<String>, func: F, options: RuleOptions)
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        let tag = tag.into();
        let registration = RuleRegistration {
            tag: tag.clone(),
            func: Arc::new(func),
            call_if_null: options.call_if_null,
            translations: options.translations,
        };

        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        if rules.insert(tag.clone(), Arc::new(registration)).is_some() {
            debug!(tag = %tag, "[validator] replaced custom validation");
        }
    }

    pub fn get(&self, tag: &str) -> Option<Arc<RuleRegistration>> {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Immutable copy of the current registrations, sorted by tag.
    pub fn snapshot(&self) -> RuleSnapshot {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<Arc<RuleRegistration>> = rules.values().cloned().collect();
        entries.sort_by(|a, b| a.tag.cmp(&b.tag));
        RuleSnapshot {
            rules: Arc::new(entries),
        }
    }
}

/// Point-in-time view of a [`RuleRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RuleSnapshot {
    rules: Arc<Vec<Arc<RuleRegistration>>>,
}

impl RuleSnapshot {
    /// A snapshot with no custom rules.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleRegistration> {
        self.rules.iter().map(Arc::as_ref)
    }

    pub fn get(&self, tag: &str) -> Option<&RuleRegistration> {
        self.iter().find(|rule| rule.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
