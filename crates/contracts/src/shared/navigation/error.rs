use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed taxonomy of navigation errors surfaced to the page shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidIdentifier,
    UnknownRoute,
    MissingViewBinding,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidIdentifier => "INVALID_IDENTIFIER",
            ErrorCode::UnknownRoute => "UNKNOWN_ROUTE",
            ErrorCode::MissingViewBinding => "MISSING_VIEW_BINDING",
        }
    }

    /// Заголовок для панели ошибки
    pub const fn title(&self) -> &'static str {
        match self {
            ErrorCode::InvalidIdentifier => "Dirección no válida",
            ErrorCode::UnknownRoute => "Sección no disponible",
            ErrorCode::MissingViewBinding => "Vista no registrada",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed navigation tables, detected once when the catalog is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{scope}: invalid identifier {raw:?}")]
    InvalidSlug { scope: String, raw: String },

    #[error("duplicate module '{0}'")]
    DuplicateModule(String),

    #[error("{scope}: duplicate route '{route}' in registry {version}")]
    DuplicateRoute {
        scope: String,
        route: String,
        version: &'static str,
    },

    #[error("{scope}: duplicate alias '{alias}'")]
    DuplicateAlias { scope: String, alias: String },

    #[error("{scope}: alias '{alias}' points at itself")]
    AliasCycle { scope: String, alias: String },

    #[error("{scope}: alias '{alias}' targets '{target}', which is itself an alias")]
    AliasChain {
        scope: String,
        alias: String,
        target: String,
    },

    #[error("{scope}: alias '{alias}' shadows a canonical route")]
    AliasShadowsRoute { scope: String, alias: String },

    #[error("{scope}: alias '{alias}' must set exactly one of `to` or `external`")]
    AliasTargetAmbiguous { scope: String, alias: String },

    #[error("{scope}: alias '{alias}' targets unknown identifier '{target}'")]
    AliasTargetUnknown {
        scope: String,
        alias: String,
        target: String,
    },

    #[error("{scope}: external target {target:?} must be an absolute path or https URL")]
    BadExternalTarget { scope: String, target: String },

    #[error("{scope}: external target {target:?} points at a legacy alias, not a canonical location")]
    ExternalTargetAliased { scope: String, target: String },

    #[error("{scope}: unknown feature flag '{flag}'")]
    UnknownFlag { scope: String, flag: String },

    #[error("{0}: version flag is set but registry v2 is missing")]
    MissingV2Registry(String),

    #[error("{scope}: default identifier '{identifier}' is missing from registry {version}")]
    MissingDefault {
        scope: String,
        identifier: String,
        version: &'static str,
    },

    #[error("{scope}: navigation item '{item}' matches no route in any registry")]
    DanglingNavItem { scope: String, item: String },

    #[error("{scope}: navigation item '{item}' must set exactly one of `id` or `exit`")]
    NavItemAmbiguous { scope: String, item: String },

    #[error("home module '{0}' is not declared")]
    UnknownHome(String),
}
