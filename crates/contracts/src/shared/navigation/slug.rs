//! Slug validation
//!
//! Все идентификаторы (модули, табы, сегменты пути) проходят через `validate`
//! до любого поиска в таблицах. Успешный результат: `Slug`, который нельзя
//! сконструировать в обход проверки.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ErrorCode;

/// Human-readable template; `{raw}` is replaced with the offending value.
pub const INVALID_IDENTIFIER_TEMPLATE: &str =
    "El identificador «{raw}» no es válido: solo se permiten a-z, 0-9, '-' y '_'";

/// Identifier known to match `^[a-z0-9_-]+$`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = InvalidIdentifier;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if is_valid_slug(&raw) {
            Ok(Slug(raw))
        } else {
            Err(InvalidIdentifier { raw })
        }
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

/// Rejected identifier with the raw input preserved for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier {raw:?}")]
pub struct InvalidIdentifier {
    pub raw: String,
}

impl InvalidIdentifier {
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidIdentifier
    }

    pub fn message(&self) -> String {
        INVALID_IDENTIFIER_TEMPLATE.replace("{raw}", &self.raw)
    }
}

/// Validate a raw identifier taken from a path segment or query parameter.
pub fn validate(raw: &str) -> Result<Slug, InvalidIdentifier> {
    Slug::try_from(raw.to_string())
}

fn is_valid_slug(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ascii_tokens() {
        for raw in ["action-center", "pendientes", "p900_sales", "a", "0", "-", "_x-1"] {
            let slug = validate(raw).expect(raw);
            assert_eq!(slug.as_str(), raw);
        }
    }

    #[test]
    fn test_rejects_everything_else() {
        let rejected = [
            "",
            " ",
            "ÑOÑO!!",
            "Compras",
            "action center",
            "../etc",
            "compras/ordenes",
            "tab\n",
            "café",
            "%2e%2e",
            "a.b",
        ];
        for raw in rejected {
            let err = validate(raw).unwrap_err();
            assert_eq!(err.raw, raw);
            assert_eq!(err.code(), ErrorCode::InvalidIdentifier);
        }
    }

    #[test]
    fn test_validator_is_total() {
        // Every char class, including multi-byte and control characters
        let samples: Vec<String> = (0u32..0x2FF)
            .filter_map(char::from_u32)
            .map(|c| format!("x{}y", c))
            .collect();
        for raw in &samples {
            let _ = validate(raw);
        }
    }

    #[test]
    fn test_message_template() {
        let err = validate("ÑOÑO!!").unwrap_err();
        assert!(err.message().contains("«ÑOÑO!!»"));
        assert!(err.message().starts_with("El identificador"));
    }

    #[test]
    fn test_deserialize_checks_pattern() {
        let ok: Result<Slug, _> = serde_json::from_str("\"ordenes\"");
        assert!(ok.is_ok());
        let bad: Result<Slug, _> = serde_json::from_str("\"Ordenes\"");
        assert!(bad.is_err());
    }
}
