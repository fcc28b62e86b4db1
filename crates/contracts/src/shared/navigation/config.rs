//! TOML shape of the navigation catalog.
//!
//! Raw strings only; `NavigationCatalog::from_config` validates everything
//! and reports problems with the module they belong to.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default catalog embedded in the binary
pub const DEFAULT_CATALOG: &str = include_str!("catalog.toml");

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub home: String,
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
    pub modules: Vec<ModuleConfig>,
}

/// Where a module reads its identifier from.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierSource {
    /// `?<param>=<identifier>`
    Query(String),
    /// `/<module>/<identifier>`
    Segment,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub identifier: IdentifierSource,
    pub default: String,
    #[serde(default)]
    pub version_flag: Option<String>,
    pub registry: RegistryConfig,
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
    #[serde(default)]
    pub nav: Vec<NavItemConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub v1: Vec<RouteConfig>,
    #[serde(default)]
    pub v2: Option<Vec<RouteConfig>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub id: String,
    pub view: String,
    #[serde(default)]
    pub requires: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    /// Preset query merged into the redirect
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub external: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct NavItemConfig {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub exit: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

pub fn parse_catalog(src: &str) -> Result<CatalogConfig, toml::de::Error> {
    toml::from_str(src)
}
