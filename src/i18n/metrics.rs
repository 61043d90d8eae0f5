//! Translation metrics and observability module.
//!
//! Each validator owns its own counters so that independent validators (and
//! tests) never share state.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-validator translation metrics.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of validation calls
    validations: AtomicUsize,

    /// Number of validation calls that reported a rule violation
    failures: AtomicUsize,

    /// Number of failures rendered from a locale template
    translated: AtomicUsize,

    /// Number of failures rendered with the untranslated description
    fallbacks: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validation call.
    pub fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rule violation.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message rendered from a template.
    pub fn record_translated(&self) {
        self.translated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message that fell back to the default description.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn translated(&self) -> usize {
        self.translated.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let translated = self.translated();
        let fallbacks = self.fallbacks();
        let rendered = translated + fallbacks;
        let translation_rate = if rendered > 0 {
            (translated as f64 / rendered as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            validations: self.validations(),
            failures: self.failures(),
            translated,
            fallbacks,
            translation_rate,
        }
    }
}

/// Metrics report containing current translation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of validation calls
    pub validations: usize,

    /// Number of rule violations
    pub failures: usize,

    /// Number of messages rendered from a template
    pub translated: usize,

    /// Number of messages that used the default description
    pub fallbacks: usize,

    /// Share of messages rendered from a template, as a percentage (0-100)
    pub translation_rate: f64,
}
