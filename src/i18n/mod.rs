//! Internationalization (i18n) for validation messages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `locale`: Normalization and the resolved `Locale` type
//! - `catalog`: Built-in message templates per locale
//! - `translator`: Per-locale template store and placeholder rendering
//! - `check`: Catalog consistency checks
//! - `metrics`: Translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use tagged_validator::i18n::{catalog_for, Locale, Translator};
//!
//! let locale = Locale::resolve("zh-CN", "zh");
//! let mut translator = Translator::new(locale.code());
//! translator.load_catalog(catalog_for(locale.requested()).unwrap());
//! ```

mod catalog;
mod check;
mod locale;
mod metrics;
mod registry;
mod translator;

pub use catalog::{
    canonical_catalog, catalog_for, MessageCatalog, CHINESE_CATALOG, ENGLISH_CATALOG,
    SPANISH_CATALOG,
};
pub use check::{CatalogChecker, ValidationReport};
pub use locale::{base_language, normalize_locale, Locale};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use translator::{Translator, TranslatorError};
