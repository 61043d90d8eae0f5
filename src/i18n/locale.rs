//! Locale type: Normalized, registry-backed locale representation.
//!
//! A [`Locale`] remembers both what the caller asked for (`zh_CN`) and the
//! registry entry it resolved to (`zh`). Catalog and custom-rule translations
//! are looked up by the requested code first, then by the resolved one.

use tracing::warn;

use super::LocaleRegistry;

/// Normalize locale separators for lookup consistency (`zh-CN` → `zh_CN`).
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('-', "_")
}

/// Base language of a normalized locale: the text before the first `_`.
///
/// Returns `None` when the locale has no region part.
pub fn base_language(locale: &str) -> Option<&str> {
    locale
        .split_once('_')
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty())
}

/// A resolved locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Normalized code the caller asked for (e.g., "zh_CN")
    requested: String,

    /// Registry code it resolved to (e.g., "zh")
    code: &'static str,
}

impl Locale {
    /// Resolve a locale, never failing.
    ///
    /// An empty request uses `default_locale`. An unknown request falls back
    /// to its base language, then to `default_locale`, then to the registry
    /// default.
    pub fn resolve(requested: &str, default_locale: &str) -> Locale {
        let mut normalized = normalize_locale(requested);
        if normalized.is_empty() {
            normalized = normalize_locale(default_locale);
        }

        let registry = LocaleRegistry::get();
        let config = match registry.resolve(&normalized) {
            Some(config) => config,
            None => {
                warn!(
                    locale = %normalized,
                    fallback = default_locale,
                    "[validator] unknown locale, using default"
                );
                registry
                    .resolve(default_locale)
                    .unwrap_or_else(|| registry.default_locale())
            }
        };

        Locale {
            requested: normalized,
            code: config.code,
        }
    }

    /// Normalized code the caller asked for.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Registry code this locale resolved to.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Normalization Tests ====================

    #[test]
    fn test_normalize_replaces_hyphens() {
        assert_eq!(normalize_locale("zh-CN"), "zh_CN");
        assert_eq!(normalize_locale("zh_CN"), "zh_CN");
        assert_eq!(normalize_locale(" en "), "en");
        assert_eq!(normalize_locale("sr-Latn-RS"), "sr_Latn_RS");
    }

    #[test]
    fn test_base_language() {
        assert_eq!(base_language("zh_CN"), Some("zh"));
        assert_eq!(base_language("sr_Latn_RS"), Some("sr"));
        assert_eq!(base_language("zh"), None);
        assert_eq!(base_language("_CN"), None);
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_empty_uses_default() {
        let locale = Locale::resolve("", "en");
        assert_eq!(locale.requested(), "en");
        assert_eq!(locale.code(), "en");
    }

    #[test]
    fn test_resolve_region_keeps_request() {
        let locale = Locale::resolve("zh-CN", "en");
        assert_eq!(locale.requested(), "zh_CN");
        assert_eq!(locale.code(), "zh");
    }

    #[test]
    fn test_resolve_unknown_uses_default() {
        let locale = Locale::resolve("fr_FR", "zh");
        assert_eq!(locale.requested(), "fr_FR");
        assert_eq!(locale.code(), "zh");
    }

    #[test]
    fn test_resolve_unknown_default_uses_registry_default() {
        let locale = Locale::resolve("fr", "xx");
        assert_eq!(locale.code(), "zh");
    }

    proptest! {
        #[test]
        fn prop_hyphen_and_underscore_resolve_identically(
            base in "[a-z]{2}",
            region in "[A-Z]{2}",
        ) {
            let hyphen = Locale::resolve(&format!("{}-{}", base, region), "zh");
            let underscore = Locale::resolve(&format!("{}_{}", base, region), "zh");
            prop_assert_eq!(hyphen, underscore);
        }

        #[test]
        fn prop_normalized_locale_has_no_hyphens(locale in "[a-zA-Z_-]{0,12}") {
            prop_assert!(!normalize_locale(&locale).contains('-'));
        }
    }
}
