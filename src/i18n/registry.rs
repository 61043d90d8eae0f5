//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized registry of the locales a validator can
//! be built for. It uses a singleton pattern with `OnceLock` to ensure
//! thread-safe initialization and access.

use std::sync::OnceLock;

use super::locale::{base_language, normalize_locale};

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Normalized locale code (e.g., "en", "zh", "zh_TW")
    pub code: &'static str,

    /// Whether this is the fallback locale (only one should be true)
    pub is_default: bool,

    /// Whether this locale can be resolved
    pub enabled: bool,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Resolve a requested locale to an enabled registry entry.
    ///
    /// The request is normalized (`zh-CN` → `zh_CN`), then matched exactly,
    /// then by its base language (`zh_CN` → `zh`).
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` for the best enabled match
    /// * `None` if neither the locale nor its base language is known
    pub fn resolve(&self, requested: &str) -> Option<&LocaleConfig> {
        let normalized = normalize_locale(requested);
        self.enabled(&normalized).or_else(|| {
            base_language(&normalized).and_then(|base| self.enabled(base))
        })
    }

    /// Get the default locale configuration.
    ///
    /// Falls back to the first entry if no locale is flagged as default.
    pub fn default_locale(&self) -> &LocaleConfig {
        self.locales
            .iter()
            .find(|locale| locale.is_default)
            .unwrap_or(&self.locales[0])
    }

    fn enabled(&self, code: &str) -> Option<&LocaleConfig> {
        self.get_by_code(code).filter(|locale| locale.enabled)
    }
}

/// Default locale configurations. Each has a built-in message catalog.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "zh",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            is_default: false,
            enabled: true,
        },
        LocaleConfig {
            code: "es",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_chinese() {
        let config = LocaleRegistry::get().get_by_code("zh").unwrap();
        assert_eq!(config.code, "zh");
        assert!(config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_resolve_exact() {
        let config = LocaleRegistry::get().resolve("en").unwrap();
        assert_eq!(config.code, "en");
    }

    #[test]
    fn test_resolve_region_falls_back_to_base() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.resolve("zh_CN").unwrap().code, "zh");
        assert_eq!(registry.resolve("zh-CN").unwrap().code, "zh");
        assert_eq!(registry.resolve("en-US").unwrap().code, "en");
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(LocaleRegistry::get().resolve("fr_FR").is_none());
        assert!(LocaleRegistry::get().resolve("").is_none());
    }

    #[test]
    fn test_default_locale_is_chinese() {
        let default = LocaleRegistry::get().default_locale();
        assert_eq!(default.code, "zh");
    }
}
