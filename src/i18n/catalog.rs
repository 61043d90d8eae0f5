//! Built-in message catalogs.
//!
//! Keys are tag names, optionally suffixed with the value kind
//! (`min-string`, `min-number`, `min-items`). Templates use positional
//! placeholders: `{0}` is the field name and `{1}` the tag parameter.

use super::locale::base_language;

/// A static table of message templates for one locale.
#[derive(Debug, Clone, Copy)]
pub struct MessageCatalog {
    /// Locale code the catalog is written for
    pub locale: &'static str,

    /// `(key, template)` pairs
    pub entries: &'static [(&'static str, &'static str)],
}

impl MessageCatalog {
    /// Get the template registered under `key`.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == key)
            .map(|(_, template)| *template)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ==================== English Catalog ====================

/// English messages (canonical)
pub const ENGLISH_CATALOG: MessageCatalog = MessageCatalog {
    locale: "en",
    entries: &[
        ("required", "{0} is a required field"),
        // Sizes
        ("len-string", "{0} must be {1} characters in length"),
        ("len-number", "{0} must be equal to {1}"),
        ("len-items", "{0} must contain {1} items"),
        ("min-string", "{0} must be at least {1} characters in length"),
        ("min-number", "{0} must be {1} or greater"),
        ("min-items", "{0} must contain at least {1} items"),
        ("max-string", "{0} must be a maximum of {1} characters in length"),
        ("max-number", "{0} must be {1} or less"),
        ("max-items", "{0} must contain at maximum {1} items"),
        ("eq", "{0} is not equal to {1}"),
        ("ne", "{0} should not be equal to {1}"),
        ("gt-string", "{0} must be greater than {1} characters in length"),
        ("gt-number", "{0} must be greater than {1}"),
        ("gt-items", "{0} must contain more than {1} items"),
        ("gte-string", "{0} must be at least {1} characters in length"),
        ("gte-number", "{0} must be {1} or greater"),
        ("gte-items", "{0} must contain at least {1} items"),
        ("lt-string", "{0} must be less than {1} characters in length"),
        ("lt-number", "{0} must be less than {1}"),
        ("lt-items", "{0} must contain less than {1} items"),
        ("lte-string", "{0} must be at maximum {1} characters in length"),
        ("lte-number", "{0} must be {1} or less"),
        ("lte-items", "{0} must contain at maximum {1} items"),
        // Sets and substrings
        ("oneof", "{0} must be one of [{1}]"),
        ("contains", "{0} must contain the text '{1}'"),
        ("excludes", "{0} cannot contain the text '{1}'"),
        ("startswith", "{0} must start with text '{1}'"),
        ("endswith", "{0} must end with text '{1}'"),
        // Formats
        ("email", "{0} must be a valid email address"),
        ("url", "{0} must be a valid URL"),
        ("ip", "{0} must be a valid IP address"),
        ("ipv4", "{0} must be a valid IPv4 address"),
        ("ipv6", "{0} must be a valid IPv6 address"),
        ("alpha", "{0} can only contain alphabetic characters"),
        ("alphanum", "{0} can only contain alphanumeric characters"),
        ("numeric", "{0} must be a valid numeric value"),
        ("number", "{0} must be a valid number"),
        ("lowercase", "{0} must be a lowercase string"),
        ("uppercase", "{0} must be an uppercase string"),
        ("boolean", "{0} must be a valid boolean value"),
        ("json", "{0} must be a valid json string"),
        ("datetime", "{0} does not match the {1} format"),
        // Cross-field
        ("eqfield", "{0} must be equal to {1}"),
        ("nefield", "{0} cannot be equal to {1}"),
        ("gtfield", "{0} must be greater than {1}"),
        ("gtefield", "{0} must be greater than or equal to {1}"),
        ("ltfield", "{0} must be less than {1}"),
        ("ltefield", "{0} must be less than or equal to {1}"),
    ],
};

// ==================== Chinese Catalog ====================

pub const CHINESE_CATALOG: MessageCatalog = MessageCatalog {
    locale: "zh",
    entries: &[
        ("required", "{0}为必填字段"),
        // Sizes
        ("len-string", "{0}长度必须是{1}个字符"),
        ("len-number", "{0}必须等于{1}"),
        ("len-items", "{0}必须包含{1}项"),
        ("min-string", "{0}长度必须至少为{1}个字符"),
        ("min-number", "{0}最小只能为{1}"),
        ("min-items", "{0}必须至少包含{1}项"),
        ("max-string", "{0}长度不能超过{1}个字符"),
        ("max-number", "{0}必须小于或等于{1}"),
        ("max-items", "{0}最多只能包含{1}项"),
        ("eq", "{0}不等于{1}"),
        ("ne", "{0}不能等于{1}"),
        ("gt-string", "{0}长度必须大于{1}个字符"),
        ("gt-number", "{0}必须大于{1}"),
        ("gt-items", "{0}必须大于{1}项"),
        ("gte-string", "{0}长度必须至少为{1}个字符"),
        ("gte-number", "{0}必须大于或等于{1}"),
        ("gte-items", "{0}必须至少包含{1}项"),
        ("lt-string", "{0}长度必须小于{1}个字符"),
        ("lt-number", "{0}必须小于{1}"),
        ("lt-items", "{0}必须包含少于{1}项"),
        ("lte-string", "{0}长度不能超过{1}个字符"),
        ("lte-number", "{0}必须小于或等于{1}"),
        ("lte-items", "{0}最多只能包含{1}项"),
        // Sets and substrings
        ("oneof", "{0}必须是[{1}]中的一个"),
        ("contains", "{0}必须包含文本'{1}'"),
        ("excludes", "{0}不能包含文本'{1}'"),
        ("startswith", "{0}必须以文本'{1}'开头"),
        ("endswith", "{0}必须以文本'{1}'结尾"),
        // Formats
        ("email", "{0}必须是一个有效的邮箱"),
        ("url", "{0}必须是一个有效的URL"),
        ("ip", "{0}必须是一个有效的IP地址"),
        ("ipv4", "{0}必须是一个有效的IPv4地址"),
        ("ipv6", "{0}必须是一个有效的IPv6地址"),
        ("alpha", "{0}只能包含字母"),
        ("alphanum", "{0}只能包含字母和数字"),
        ("numeric", "{0}必须是一个有效的数值"),
        ("number", "{0}必须是一个有效的数字"),
        ("lowercase", "{0}必须是小写字母"),
        ("uppercase", "{0}必须是大写字母"),
        ("boolean", "{0}必须是一个有效的布尔值"),
        ("json", "{0}必须是一个JSON字符串"),
        ("datetime", "{0}的格式必须是{1}"),
        // Cross-field
        ("eqfield", "{0}必须等于{1}"),
        ("nefield", "{0}不能等于{1}"),
        ("gtfield", "{0}必须大于{1}"),
        ("gtefield", "{0}必须大于或等于{1}"),
        ("ltfield", "{0}必须小于{1}"),
        ("ltefield", "{0}必须小于或等于{1}"),
    ],
};

// ==================== Spanish Catalog ====================

pub const SPANISH_CATALOG: MessageCatalog = MessageCatalog {
    locale: "es",
    entries: &[
        ("required", "{0} es un campo requerido"),
        // Sizes
        ("len-string", "{0} debe tener {1} caracteres"),
        ("len-number", "{0} debe ser igual a {1}"),
        ("len-items", "{0} debe contener {1} elementos"),
        ("min-string", "{0} debe tener al menos {1} caracteres"),
        ("min-number", "{0} debe ser {1} o más"),
        ("min-items", "{0} debe contener al menos {1} elementos"),
        ("max-string", "{0} debe tener un máximo de {1} caracteres"),
        ("max-number", "{0} debe ser {1} o menos"),
        ("max-items", "{0} debe contener como máximo {1} elementos"),
        ("eq", "{0} no es igual a {1}"),
        ("ne", "{0} no debería ser igual a {1}"),
        ("gt-string", "{0} debe tener más de {1} caracteres"),
        ("gt-number", "{0} debe ser mayor que {1}"),
        ("gt-items", "{0} debe contener más de {1} elementos"),
        ("gte-string", "{0} debe tener al menos {1} caracteres"),
        ("gte-number", "{0} debe ser {1} o mayor"),
        ("gte-items", "{0} debe contener al menos {1} elementos"),
        ("lt-string", "{0} debe tener menos de {1} caracteres"),
        ("lt-number", "{0} debe ser menor que {1}"),
        ("lt-items", "{0} debe contener menos de {1} elementos"),
        ("lte-string", "{0} debe tener un máximo de {1} caracteres"),
        ("lte-number", "{0} debe ser {1} o menor"),
        ("lte-items", "{0} debe contener como máximo {1} elementos"),
        // Sets and substrings
        ("oneof", "{0} debe ser uno de [{1}]"),
        ("contains", "{0} debe contener el texto '{1}'"),
        ("excludes", "{0} no puede contener el texto '{1}'"),
        ("startswith", "{0} debe empezar con el texto '{1}'"),
        ("endswith", "{0} debe terminar con el texto '{1}'"),
        // Formats
        ("email", "{0} debe ser una dirección de correo electrónico válida"),
        ("url", "{0} debe ser una URL válida"),
        ("ip", "{0} debe ser una dirección IP válida"),
        ("ipv4", "{0} debe ser una dirección IPv4 válida"),
        ("ipv6", "{0} debe ser una dirección IPv6 válida"),
        ("alpha", "{0} sólo puede contener caracteres alfabéticos"),
        ("alphanum", "{0} sólo puede contener caracteres alfanuméricos"),
        ("numeric", "{0} debe ser un valor numérico válido"),
        ("number", "{0} debe ser un número válido"),
        ("lowercase", "{0} debe estar en minúsculas"),
        ("uppercase", "{0} debe estar en mayúsculas"),
        ("boolean", "{0} debe ser un valor booleano válido"),
        ("json", "{0} debe ser una cadena json válida"),
        ("datetime", "{0} no cumple con el formato de {1}"),
        // Cross-field
        ("eqfield", "{0} debe ser igual a {1}"),
        ("nefield", "{0} no puede ser igual a {1}"),
        ("gtfield", "{0} debe ser mayor que {1}"),
        ("gtefield", "{0} debe ser mayor o igual a {1}"),
        ("ltfield", "{0} debe ser menor que {1}"),
        ("ltefield", "{0} debe ser menor o igual a {1}"),
    ],
};

const CATALOGS: &[MessageCatalog] = &[ENGLISH_CATALOG, CHINESE_CATALOG, SPANISH_CATALOG];

/// The catalog every other catalog is checked against.
pub fn canonical_catalog() -> &'static MessageCatalog {
    &ENGLISH_CATALOG
}

/// Get the built-in catalog for a normalized locale, falling back to its
/// base language (`zh_CN` → `zh`).
pub fn catalog_for(locale: &str) -> Option<&'static MessageCatalog> {
    let find = |code: &str| CATALOGS.iter().find(|catalog| catalog.locale == code);
    find(locale).or_else(|| base_language(locale).and_then(find))
}
