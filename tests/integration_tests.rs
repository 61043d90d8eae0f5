//! Integration tests for tagged-validator
//!
//! These tests exercise the public surface end to end: rule registration,
//! locale resolution, struct/field validation and message translation.

use serde::Serialize;
use serial_test::serial;
use std::sync::Once;
use tagged_validator::{
    config::DEFAULT_LOCALE_ENV,
    i18n::{CatalogChecker, CHINESE_CATALOG, ENGLISH_CATALOG, SPANISH_CATALOG},
    Config, Error, FieldLevel, FieldRules, RuleOptions, RuleRegistry, RuleSnapshot, Translation,
    Validator,
};

// ==================== Test Helpers ====================

static TRACING: Once = Once::new();

/// Route warnings (e.g. translation misses) to the test output.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("tagged_validator=debug"))
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TestBody {
    name: String,
    age: i64,
}

impl FieldRules for TestBody {
    fn field_rules() -> &'static [(&'static str, &'static str)] {
        &[("Name", "required"), ("Age", "required,min=18,max=200")]
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TestBody2 {
    name: String,
    age: i64,
}

impl FieldRules for TestBody2 {
    fn field_rules() -> &'static [(&'static str, &'static str)] {
        &[("Name", "required,custom"), ("Age", "required,min=18,max=200")]
    }
}

fn custom_registry() -> RuleRegistry {
    let registry = RuleRegistry::new();
    registry.register(
        "custom",
        |level: &FieldLevel<'_>| level.value() == "test",
        RuleOptions::new().translations([
            ("zh", Translation::new("输入的名称无效")),
            ("en", Translation::new("invalid name")),
        ]),
    );
    registry
}

fn message(result: Result<(), Error>) -> String {
    result.expect_err("expected a validation failure").to_string()
}

// ==================== End-to-end Tests ====================

#[test]
fn test_validator_end_to_end() {
    init_tracing();
    let v = Validator::new(None, &RuleSnapshot::empty());
    let mut a = TestBody {
        name: String::new(),
        age: 6,
    };

    assert_eq!(message(v.validate_struct(&a)), "Name为必填字段");

    a.name = "test".to_string();
    let result = v.validate_value(&a, &[]);
    assert!(!result.is_ok());
    assert_eq!(result.field(), Some("Age"));
    assert_eq!(result.error().unwrap().to_string(), "Age最小只能为18");

    a.age = 20;
    let result = v.validate_value(&a, &[]);
    assert!(result.is_ok());
    assert!(result.error().is_none());
    assert!(v.validate_struct(&a).is_ok());

    // A second validator behaves identically.
    let v2 = Validator::new(None, &RuleSnapshot::empty());
    a.name = String::new();
    assert_eq!(message(v2.validate_struct(&a)), "Name为必填字段");
}

#[test]
fn test_required_failure_reports_field_name() {
    let v = Validator::new(Some("en"), &RuleSnapshot::empty());
    let result = v.validate_value(
        &TestBody {
            name: String::new(),
            age: 30,
        },
        &[],
    );
    assert_eq!(result.field(), Some("Name"));
    assert_eq!(result.raw().unwrap().tag(), "required");
}

#[test]
fn test_range_boundaries() {
    let v = Validator::new(Some("en"), &RuleSnapshot::empty());
    let body = |age| TestBody {
        name: "test".to_string(),
        age,
    };

    assert_eq!(message(v.validate_struct(&body(17))), "Age must be 18 or greater");
    assert_eq!(message(v.validate_struct(&body(201))), "Age must be 200 or less");
    for age in [18, 100, 200] {
        assert!(v.validate_struct(&body(age)).is_ok(), "age {} should pass", age);
    }
}

// ==================== Custom Rule Tests ====================

#[test]
fn test_custom_validator() {
    init_tracing();
    let registry = custom_registry();
    let v = Validator::new(Some("zh"), &registry.snapshot());
    let mut a = TestBody2 {
        name: String::new(),
        age: 6,
    };

    assert_eq!(message(v.validate_struct(&a)), "Name为必填字段");

    a.name = "test2".to_string();
    let result = v.validate_value(&a, &[]);
    assert!(!result.is_ok());
    assert_eq!(result.error().unwrap().to_string(), "输入的名称无效");

    a.name = "test".to_string();
    let result = v.validate_value(&a, &[]);
    assert!(!result.is_ok());
    assert_eq!(result.error().unwrap().to_string(), "Age最小只能为18");
}

#[test]
fn test_custom_translation_per_locale() {
    init_tracing();
    let snapshot = custom_registry().snapshot();
    let body = TestBody2 {
        name: "test2".to_string(),
        age: 30,
    };

    let en = Validator::new(Some("en-US"), &snapshot);
    assert_eq!(message(en.validate_struct(&body)), "invalid name");

    let es = Validator::new(Some("es"), &snapshot);
    let fallback = message(es.validate_struct(&body));
    assert!(!fallback.is_empty());
    assert_eq!(
        fallback,
        "Key: 'Name' Error:Field validation for 'Name' failed on the 'custom' tag"
    );
}

#[test]
fn test_second_registration_wins() {
    let registry = RuleRegistry::new();
    registry.register(
        "custom",
        |_: &FieldLevel<'_>| false,
        RuleOptions::new().translation("en", "first"),
    );
    registry.register(
        "custom",
        |level: &FieldLevel<'_>| level.value() == "ok",
        RuleOptions::new().translation("en", "second"),
    );

    let v = Validator::new(Some("en"), &registry.snapshot());
    assert!(v.validate_field("ok", "custom").is_ok());
    assert_eq!(message(v.validate_field("bad", "custom")), "second");
}

#[test]
fn test_overriding_builtin_message_applies_to_every_kind() {
    let registry = RuleRegistry::new();
    registry.register(
        "min",
        |_: &FieldLevel<'_>| false,
        RuleOptions::new()
            .call_if_null(true)
            .translation_override("en", "{0} is too small")
            .translation_override("zh", "{0}太小"),
    );
    let snapshot = registry.snapshot();

    let en = Validator::new(Some("en"), &snapshot);
    let result = en.validate_named_field("Age", &6, "min=18");
    assert_eq!(result.error().unwrap().to_string(), "Age is too small");

    let zh = Validator::new(Some("zh"), &snapshot);
    let body = TestBody {
        name: "test".to_string(),
        age: 6,
    };
    assert_eq!(message(zh.validate_struct(&body)), "Age太小");
}

#[test]
fn test_spanish_builtin_messages() {
    let v = Validator::new(Some("es-MX"), &RuleSnapshot::empty());
    let body = TestBody {
        name: "test".to_string(),
        age: 6,
    };
    assert_eq!(message(v.validate_struct(&body)), "Age debe ser 18 o más");
}

#[test]
fn test_registration_after_snapshot_is_not_applied() {
    let registry = RuleRegistry::new();
    let v = Validator::new(Some("en"), &registry.snapshot());
    registry.register("late", |_: &FieldLevel<'_>| true, RuleOptions::new());

    let error = v.validate_field("x", "late").unwrap_err();
    assert!(!error.is_invalid());
}

// ==================== Locale Tests ====================

#[test]
fn test_hyphen_and_underscore_locales_match() {
    let hyphen = Validator::new(Some("zh-CN"), &RuleSnapshot::empty());
    let underscore = Validator::new(Some("zh_CN"), &RuleSnapshot::empty());
    let body = TestBody {
        name: String::new(),
        age: 6,
    };

    assert_eq!(hyphen.locale(), underscore.locale());
    assert_eq!(
        message(hyphen.validate_struct(&body)),
        message(underscore.validate_struct(&body))
    );
}

#[test]
fn test_unknown_locale_falls_back_without_error() {
    init_tracing();
    let region = Validator::new(Some("en_GB"), &RuleSnapshot::empty());
    assert_eq!(region.locale().code(), "en");

    let unknown = Validator::new(Some("fr"), &RuleSnapshot::empty());
    assert_eq!(unknown.locale().code(), "zh");
    assert_eq!(
        message(unknown.validate_field("", "required")),
        "为必填字段"
    );
}

#[test]
#[serial]
fn test_default_locale_from_environment() {
    std::env::set_var(DEFAULT_LOCALE_ENV, "en-US");
    let config = Config::from_env().expect("Should load config");
    std::env::remove_var(DEFAULT_LOCALE_ENV);

    let v = Validator::with_config(&config, None, &RuleSnapshot::empty());
    assert_eq!(v.locale().code(), "en");
    assert_eq!(
        message(v.validate_field("", "required")),
        " is a required field"
    );
}

// ==================== Convenience Operation Tests ====================

#[test]
fn test_named_field_with_empty_rule_passes() {
    let v = Validator::new(Some("en"), &RuleSnapshot::empty());
    for value in ["", "anything", "   "] {
        let result = v.validate_named_field("field", value, "");
        assert!(result.is_ok());
        assert!(result.field().is_none());
    }
}

#[test]
fn test_named_field_failure_uses_name() {
    let v = Validator::new(Some("zh"), &RuleSnapshot::empty());
    let result = v.validate_named_field("Email", "nope", "required,email");
    assert_eq!(result.field(), Some("Email"));
    assert_eq!(result.error().unwrap().to_string(), "Email必须是一个有效的邮箱");
}

#[test]
fn test_validate_value_partial() {
    let v = Validator::new(Some("en"), &RuleSnapshot::empty());
    let body = TestBody {
        name: String::new(),
        age: 6,
    };
    let result = v.validate_value(&body, &["Age"]);
    assert_eq!(result.field(), Some("Age"));
}

// ==================== Derive Interop Tests ====================

#[derive(validator::Validate)]
struct Signup {
    #[validate(length(min = 3))]
    username: String,
    #[validate(range(min = 18, max = 200))]
    age: i64,
}

#[test]
fn test_validate_derived_struct() {
    let v = Validator::new(Some("en"), &RuleSnapshot::empty());

    let ok = Signup {
        username: "alice".to_string(),
        age: 30,
    };
    assert!(v.validate_derived(&ok).is_ok());

    let young = Signup {
        username: "alice".to_string(),
        age: 6,
    };
    assert_eq!(message(v.validate_derived(&young)), "age must be 18 or greater");

    let short = Signup {
        username: "al".to_string(),
        age: 30,
    };
    assert_eq!(
        message(v.validate_derived(&short)),
        "username must be at least 3 characters in length"
    );
}

// ==================== Catalog & Concurrency Tests ====================

#[test]
fn test_builtin_catalogs_are_consistent() {
    assert!(CatalogChecker::validate(&ENGLISH_CATALOG, &CHINESE_CATALOG).is_clean());
    assert!(CatalogChecker::validate(&ENGLISH_CATALOG, &SPANISH_CATALOG).is_clean());
}

#[test]
fn test_validators_are_usable_across_threads() {
    let snapshot = custom_registry().snapshot();
    let zh = Validator::new(Some("zh"), &snapshot);
    let en = Validator::new(Some("en"), &snapshot);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(message(zh.validate_field("x", "custom")), "输入的名称无效");
                assert_eq!(message(en.validate_field("x", "custom")), "invalid name");
            });
        }
    });

    assert_eq!(zh.metrics().validations(), 4);
    assert_eq!(en.metrics().translated(), 4);
}
