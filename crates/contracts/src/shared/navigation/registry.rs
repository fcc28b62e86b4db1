//! Canonical route registry
//!
//! Canonical identifier -> view tag + capability flags. A module may carry two
//! registries (`v1`, `v2`); exactly one is picked per resolution.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::flags::FlagRegistry;
use super::persona::PersonaContext;
use super::slug::Slug;

/// Tag the rendering layer dispatches on, e.g. `compras.action_center`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewKey(pub String);

impl ViewKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryVersion {
    V1,
    V2,
}

impl RegistryVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RegistryVersion::V1 => "v1",
            RegistryVersion::V2 => "v2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub view: ViewKey,
    /// Все флаги должны быть включены, иначе маршрут считается отсутствующим
    pub requires: Vec<String>,
}

impl RouteEntry {
    pub fn new(view: impl Into<ViewKey>) -> Self {
        Self {
            view: view.into(),
            requires: Vec::new(),
        }
    }

    pub fn requiring(mut self, flag: impl Into<String>) -> Self {
        self.requires.push(flag.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    entries: BTreeMap<Slug, RouteEntry>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous entry if `id` was already registered.
    pub fn insert(&mut self, id: Slug, entry: RouteEntry) -> Option<RouteEntry> {
        self.entries.insert(id, entry)
    }

    pub fn contains(&self, id: &Slug) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Slug, &RouteEntry)> {
        self.entries.iter()
    }

    /// Entry for `id` if every required capability is enabled for `ctx`.
    pub fn lookup(
        &self,
        id: &Slug,
        flags: &FlagRegistry,
        ctx: &PersonaContext,
    ) -> Option<&RouteEntry> {
        self.entries
            .get(id)
            .filter(|entry| flags.all_enabled(&entry.requires, ctx))
    }
}

/// Legacy and current registries of one module plus the flag choosing between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySet {
    pub v1: RouteRegistry,
    pub v2: Option<RouteRegistry>,
    pub version_flag: Option<String>,
}

impl RegistrySet {
    pub fn single(v1: RouteRegistry) -> Self {
        Self {
            v1,
            v2: None,
            version_flag: None,
        }
    }

    /// Evaluated once per resolution; the whole registry follows the answer.
    pub fn select_version(&self, flags: &FlagRegistry, ctx: &PersonaContext) -> RegistryVersion {
        match (&self.version_flag, &self.v2) {
            (Some(flag), Some(_)) if flags.is_enabled(flag, ctx) => RegistryVersion::V2,
            _ => RegistryVersion::V1,
        }
    }

    pub fn registry(&self, version: RegistryVersion) -> &RouteRegistry {
        match (version, &self.v2) {
            (RegistryVersion::V2, Some(v2)) => v2,
            _ => &self.v1,
        }
    }

    pub fn lookup(
        &self,
        id: &Slug,
        version: RegistryVersion,
        flags: &FlagRegistry,
        ctx: &PersonaContext,
    ) -> Option<&RouteEntry> {
        self.registry(version).lookup(id, flags, ctx)
    }

    /// Present in at least one registry, capabilities ignored.
    pub fn declares(&self, id: &Slug) -> bool {
        self.v1.contains(id) || self.v2.as_ref().is_some_and(|v2| v2.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::flags::{CAP_APROBACIONES, COMPRAS_REGISTRY_V2};
    use crate::shared::navigation::persona::Role;
    use crate::shared::navigation::slug::validate;

    fn slug(s: &str) -> Slug {
        validate(s).unwrap()
    }

    fn registries() -> RegistrySet {
        let mut v1 = RouteRegistry::new();
        v1.insert(slug("resumen"), RouteEntry::new("compras.resumen"));
        v1.insert(slug("recepciones"), RouteEntry::new("compras.recepciones"));

        let mut v2 = RouteRegistry::new();
        v2.insert(slug("resumen"), RouteEntry::new("compras.resumen_v2"));
        v2.insert(
            slug("action-center"),
            RouteEntry::new("compras.action_center").requiring(CAP_APROBACIONES),
        );

        RegistrySet {
            v1,
            v2: Some(v2),
            version_flag: Some(COMPRAS_REGISTRY_V2.to_string()),
        }
    }

    #[test]
    fn test_version_selected_by_flag() {
        let flags = FlagRegistry::builtin();
        let set = registries();
        let beta = PersonaContext::new("u1", Role::Compras, "beta-acme");
        let regular = PersonaContext::new("u1", Role::Compras, "acme");
        assert_eq!(set.select_version(&flags, &beta), RegistryVersion::V2);
        assert_eq!(set.select_version(&flags, &regular), RegistryVersion::V1);
    }

    #[test]
    fn test_no_fallback_between_versions() {
        let flags = FlagRegistry::builtin();
        let set = registries();
        let ctx = PersonaContext::new("u1", Role::Compras, "beta-acme");
        assert!(set
            .lookup(&slug("recepciones"), RegistryVersion::V2, &flags, &ctx)
            .is_none());
        let entry = set
            .lookup(&slug("resumen"), RegistryVersion::V2, &flags, &ctx)
            .unwrap();
        assert_eq!(entry.view.as_str(), "compras.resumen_v2");
    }

    #[test]
    fn test_missing_capability_hides_route() {
        let flags = FlagRegistry::builtin();
        let set = registries();
        let ventas = PersonaContext::new("u2", Role::Ventas, "beta-acme");
        assert!(set
            .lookup(&slug("action-center"), RegistryVersion::V2, &flags, &ventas)
            .is_none());
        assert!(set.declares(&slug("action-center")));
    }

    #[test]
    fn test_single_registry_ignores_version() {
        let mut v1 = RouteRegistry::new();
        v1.insert(slug("monitor"), RouteEntry::new("rutas.monitor"));
        let set = RegistrySet::single(v1);
        let flags = FlagRegistry::builtin();
        let ctx = PersonaContext::new("u1", Role::Admin, "beta-acme");
        assert_eq!(set.select_version(&flags, &ctx), RegistryVersion::V1);
        assert!(set
            .lookup(&slug("monitor"), RegistryVersion::V2, &flags, &ctx)
            .is_some());
    }
}
