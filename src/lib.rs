//! Tag-driven struct and field validation with localized error messages.
//!
//! Rules are written in the familiar tag syntax (`required,min=18,max=200`),
//! custom tags are registered on a [`RuleRegistry`] together with per-locale
//! translations, and a [`Validator`] built for a locale turns the first
//! violation of every call into one human-readable message.
//!
//! ```rust,ignore
//! use serde::Serialize;
//! use tagged_validator::{FieldRules, RuleRegistry, Validator};
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct SignUp {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl FieldRules for SignUp {
//!     fn field_rules() -> &'static [(&'static str, &'static str)] {
//!         &[("Name", "required"), ("Age", "required,min=18,max=200")]
//!     }
//! }
//!
//! let validator = Validator::new(Some("en"), &RuleRegistry::global().snapshot());
//! let err = validator.validate_struct(&SignUp { name: "".into(), age: 20 }).unwrap_err();
//! assert_eq!(err.to_string(), "Name is a required field");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod registry;
pub mod translate;
pub mod validator;

pub use config::{Config, DEFAULT_LOCALE};
pub use engine::{EngineError, FieldError, FieldLevel, FieldRules, ValidationErrors};
pub use error::Error;
pub use registry::{RuleOptions, RuleRegistration, RuleRegistry, RuleSnapshot, Translation};
pub use crate::validator::{ValidateResult, Validator};
