//! Rendering of field-level failures in the active locale.

use tracing::warn;

use crate::engine::FieldError;
use crate::i18n::Translator;

/// A rendered failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Rendered from a locale template.
    Translated(String),
    /// No template for the tag; the untranslated default description.
    Fallback(String),
}

impl Message {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Message::Fallback(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Message::Translated(text) | Message::Fallback(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Message::Translated(text) | Message::Fallback(text) => text,
        }
    }
}

/// Translate one failure.
///
/// Looks up `<tag>-<kind>` first (e.g. `min-number`), then `<tag>`. `{0}` is
/// the field name and `{1}` the tag parameter. Without a template the
/// failure's default description is used and a warning is logged.
pub fn translate_field_error(translator: &Translator, error: &FieldError) -> Message {
    let params = [error.field(), error.param().unwrap_or_default()];
    let kind_key = format!("{}-{}", error.tag(), error.kind().message_suffix());

    let rendered = translator
        .translate(&kind_key, &params)
        .or_else(|| translator.translate(error.tag(), &params));

    match rendered {
        Some(text) => Message::Translated(text),
        None => {
            warn!(
                tag = error.tag(),
                field = error.field(),
                locale = translator.locale(),
                "[validator] no translation registered for tag"
            );
            Message::Fallback(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{CHINESE_CATALOG, ENGLISH_CATALOG};
    use serde_json::json;

    fn translator(catalog: &crate::i18n::MessageCatalog) -> Translator {
        let mut translator = Translator::new(catalog.locale);
        translator.load_catalog(catalog);
        translator
    }

    #[test]
    fn test_translate_required_zh() {
        let error = FieldError::new("Name", "required", None, &json!(""));
        let message = translate_field_error(&translator(&CHINESE_CATALOG), &error);
        assert_eq!(message, Message::Translated("Name为必填字段".to_string()));
    }

    #[test]
    fn test_translate_picks_kind_variant() {
        let en = translator(&ENGLISH_CATALOG);

        let number = FieldError::new("Age", "min", Some("18".into()), &json!(6));
        assert_eq!(translate_field_error(&en, &number).as_str(), "Age must be 18 or greater");

        let string = FieldError::new("Name", "min", Some("3".into()), &json!("ab"));
        assert_eq!(
            translate_field_error(&en, &string).as_str(),
            "Name must be at least 3 characters in length"
        );

        let items = FieldError::new("Tags", "max", Some("2".into()), &json!([1, 2, 3]));
        assert_eq!(
            translate_field_error(&en, &items).as_str(),
            "Tags must contain at maximum 2 items"
        );
    }

    #[test]
    fn test_translate_falls_back_to_plain_tag() {
        let error = FieldError::new("Email", "email", None, &json!("nope"));
        let message = translate_field_error(&translator(&ENGLISH_CATALOG), &error);
        assert_eq!(message.as_str(), "Email must be a valid email address");
    }

    #[test]
    fn test_translate_missing_template_uses_default_description() {
        let error = FieldError::new("Name", "custom", None, &json!("x"));
        let message = translate_field_error(&Translator::new("es"), &error);
        assert!(message.is_fallback());
        assert_eq!(
            message.into_string(),
            "Key: 'Name' Error:Field validation for 'Name' failed on the 'custom' tag"
        );
    }
}
