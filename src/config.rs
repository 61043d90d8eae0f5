use anyhow::{bail, Context, Result};

use crate::i18n::normalize_locale;

/// Locale used when a validator is built without one.
pub const DEFAULT_LOCALE: &str = "zh";

/// Environment variable overriding [`DEFAULT_LOCALE`].
pub const DEFAULT_LOCALE_ENV: &str = "VALIDATOR_DEFAULT_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Normalized fallback locale
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = match std::env::var(DEFAULT_LOCALE_ENV) {
            Ok(value) => {
                let value = normalize_locale(&value);
                if value.is_empty() {
                    bail!("{} is set but empty", DEFAULT_LOCALE_ENV);
                }
                value
            }
            Err(std::env::VarError::NotPresent) => DEFAULT_LOCALE.to_string(),
            Err(err) => {
                return Err(err).with_context(|| format!("{} is not valid unicode", DEFAULT_LOCALE_ENV))
            }
        };

        Ok(Self { default_locale })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}
