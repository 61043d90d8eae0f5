//! Catalog consistency checks.
//!
//! Verifies that a translated catalog covers the same keys as the canonical
//! one and that every template keeps its positional placeholders.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::MessageCatalog;

/// Report of errors and warnings found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys the candidate catalog is missing
    pub errors: Vec<String>,

    /// Placeholder mismatches and unexpected keys
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Checker for catalog consistency.
pub struct CatalogChecker;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogChecker {
    /// Compare a candidate catalog against the canonical one.
    ///
    /// This function checks that:
    /// - every canonical key exists in the candidate (error)
    /// - the candidate has no keys unknown to the canonical catalog (warning)
    /// - shared keys use the same placeholders (warning)
    pub fn validate(canonical: &MessageCatalog, candidate: &MessageCatalog) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, template) in canonical.entries {
            match candidate.get(key) {
                None => report.errors.push(format!(
                    "Missing key '{}' in '{}' catalog",
                    key, candidate.locale
                )),
                Some(translated) => {
                    let expected = Self::extract_placeholders(template);
                    let actual = Self::extract_placeholders(translated);
                    if expected != actual {
                        report.warnings.push(format!(
                            "Placeholder mismatch for '{}': {} has {:?}, {} has {:?}",
                            key, canonical.locale, expected, candidate.locale, actual
                        ));
                    }
                }
            }
        }

        for key in candidate.keys() {
            if canonical.get(key).is_none() {
                report.warnings.push(format!(
                    "Unexpected key '{}' in '{}' catalog",
                    key, candidate.locale
                ));
            }
        }

        report
    }

    /// Check a single template (e.g. a custom-rule translation) for the
    /// field-name placeholder.
    pub fn validate_template(template: &str) -> ValidationReport {
        let mut report = ValidationReport::new();
        if template.trim().is_empty() {
            report.errors.push("Template is empty".to_string());
        } else if !Self::extract_placeholders(template).contains("{0}") {
            report
                .warnings
                .push(format!("Template '{}' does not mention the field name", template));
        }
        report
    }

    /// Extract all `{n}` placeholders from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\d+\}").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
