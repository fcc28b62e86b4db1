//! Navigation catalog - validated modules, registries, alias tables and menus.
//!
//! Единственный источник правды для навигации. Строится один раз при старте;
//! любая ошибка конфигурации возвращается как `ConfigError`.

use std::collections::BTreeSet;

use super::alias::{AliasTable, AliasTarget};
use super::config::{
    parse_catalog, AliasConfig, CatalogConfig, IdentifierSource, ModuleConfig, NavItemConfig,
    RouteConfig, DEFAULT_CATALOG,
};
use super::error::ConfigError;
use super::flags::FlagRegistry;
use super::location::{NavigationRequest, QueryMap, RedirectTarget};
use super::registry::{RegistrySet, RegistryVersion, RouteEntry, RouteRegistry, ViewKey};
use super::slug::{validate, Slug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItemKind {
    /// Ordinary link to a canonical identifier of the module
    Link(Slug),
    /// Leaves the module through a throttled one-time redirect
    Exit(RedirectTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub icon: Option<String>,
    pub kind: NavItemKind,
    pub requires: Vec<String>,
}

impl NavItem {
    pub fn identifier(&self) -> Option<&Slug> {
        match &self.kind {
            NavItemKind::Link(id) => Some(id),
            NavItemKind::Exit(_) => None,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.kind, NavItemKind::Exit(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNav {
    pub key: Slug,
    pub title: String,
    pub icon: Option<String>,
    pub base_path: String,
    pub identifier: IdentifierSource,
    pub default_identifier: Slug,
    pub aliases: AliasTable,
    pub registries: RegistrySet,
    pub nav: Vec<NavItem>,
}

impl ModuleNav {
    /// Identifier as written in the location, before validation.
    pub fn raw_identifier<'r>(&self, request: &'r NavigationRequest) -> Option<&'r str> {
        match &self.identifier {
            IdentifierSource::Query(param) => request.query_param(param),
            IdentifierSource::Segment => request.segments().nth(1),
        }
    }

    /// Segment match on the base path: `/compras` and `/compras/...`, never `/comprasx`.
    pub fn matches_path(&self, path: &str) -> bool {
        match path.strip_prefix(&self.base_path) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Canonical location for `identifier`, keeping the rest of `request`.
    ///
    /// Extra query entries override existing ones.
    pub fn location_for(
        &self,
        identifier: &Slug,
        request: &NavigationRequest,
        extra_query: &QueryMap,
    ) -> RedirectTarget {
        let mut query = request.query.clone();
        let path = match &self.identifier {
            IdentifierSource::Query(param) => {
                query.insert(param.clone(), identifier.to_string());
                self.base_path.clone()
            }
            IdentifierSource::Segment => {
                let mut path = format!("{}/{}", self.base_path, identifier);
                for tail in request.segments().skip(2) {
                    path.push('/');
                    path.push_str(tail);
                }
                path
            }
        };
        query.extend(extra_query.iter().map(|(k, v)| (k.clone(), v.clone())));
        RedirectTarget::new(path, query)
    }

    /// Location of the module's default view with an empty query.
    pub fn default_location(&self) -> RedirectTarget {
        let empty = NavigationRequest::new(self.base_path.clone(), QueryMap::new());
        self.location_for(&self.default_identifier, &empty, &QueryMap::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCatalog {
    home: usize,
    aliases: AliasTable,
    modules: Vec<ModuleNav>,
}

impl NavigationCatalog {
    /// The catalog embedded in the crate.
    pub fn builtin(flags: &FlagRegistry) -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CATALOG, flags)
    }

    pub fn from_toml(src: &str, flags: &FlagRegistry) -> Result<Self, ConfigError> {
        let config = parse_catalog(src)?;
        Self::from_config(config, flags)
    }

    pub fn from_config(config: CatalogConfig, flags: &FlagRegistry) -> Result<Self, ConfigError> {
        let mut modules: Vec<ModuleNav> = Vec::with_capacity(config.modules.len());
        for module in config.modules {
            let module = build_module(module, flags)?;
            if modules.iter().any(|m| m.key == module.key) {
                return Err(ConfigError::DuplicateModule(module.key.to_string()));
            }
            modules.push(module);
        }

        let home_key = slug_in("catalog", &config.home)?;
        let home = modules
            .iter()
            .position(|m| m.key == home_key)
            .ok_or_else(|| ConfigError::UnknownHome(home_key.to_string()))?;

        let aliases = {
            let keys: BTreeSet<&Slug> = modules.iter().map(|m| &m.key).collect();
            build_aliases("catalog", config.aliases, |id| keys.contains(id))?
        };

        let catalog = Self {
            home,
            aliases,
            modules,
        };
        catalog.check_external_targets()?;

        log::info!(
            "navigation catalog loaded: {} modules, {} top-level aliases",
            catalog.modules.len(),
            catalog.aliases.len()
        );

        Ok(catalog)
    }

    /// In-app external targets must land on a canonical location, so that
    /// following one never costs a second redirect.
    fn check_external_targets(&self) -> Result<(), ConfigError> {
        let mut targets: Vec<(&str, &RedirectTarget)> =
            external_targets("catalog", &self.aliases).collect();
        for module in &self.modules {
            targets.extend(external_targets(module.key.as_str(), &module.aliases));
            targets.extend(module.nav.iter().filter_map(|item| match &item.kind {
                NavItemKind::Exit(target) => Some((module.key.as_str(), target)),
                NavItemKind::Link(_) => None,
            }));
        }

        match targets.into_iter().find(|(_, target)| self.lands_on_alias(target)) {
            Some((scope, target)) => Err(ConfigError::ExternalTargetAliased {
                scope: scope.to_string(),
                target: target.to_url(),
            }),
            None => Ok(()),
        }
    }

    fn lands_on_alias(&self, target: &RedirectTarget) -> bool {
        if !target.path.starts_with('/') {
            return false;
        }
        let request = NavigationRequest::new(target.path.clone(), target.query.clone());
        let Some(key) = request.segments().next().and_then(|s| validate(s).ok()) else {
            return false;
        };
        if self.aliases.contains(&key) {
            return true;
        }
        let Some(module) = self.module(key.as_str()) else {
            return false;
        };
        module
            .raw_identifier(&request)
            .and_then(|raw| validate(raw).ok())
            .is_some_and(|id| module.aliases.contains(&id))
    }

    pub fn modules(&self) -> &[ModuleNav] {
        &self.modules
    }

    pub fn module(&self, key: &str) -> Option<&ModuleNav> {
        self.modules.iter().find(|m| m.key.as_str() == key)
    }

    pub fn home(&self) -> &ModuleNav {
        &self.modules[self.home]
    }

    /// Top-level aliases (legacy module paths).
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Every view tag referenced by any registry.
    pub fn views(&self) -> BTreeSet<&ViewKey> {
        self.modules
            .iter()
            .flat_map(|m| {
                let v2 = m.registries.v2.iter().flat_map(|r| r.iter());
                m.registries.v1.iter().chain(v2).map(|(_, entry)| &entry.view)
            })
            .collect()
    }
}

fn slug_in(scope: &str, raw: &str) -> Result<Slug, ConfigError> {
    validate(raw).map_err(|e| ConfigError::InvalidSlug {
        scope: scope.to_string(),
        raw: e.raw,
    })
}

fn check_flags(scope: &str, names: &[String], flags: &FlagRegistry) -> Result<(), ConfigError> {
    match names.iter().find(|name| !flags.contains(name)) {
        Some(flag) => Err(ConfigError::UnknownFlag {
            scope: scope.to_string(),
            flag: flag.clone(),
        }),
        None => Ok(()),
    }
}

fn parse_external(scope: &str, raw: &str) -> Result<RedirectTarget, ConfigError> {
    if !(raw.starts_with('/') || raw.starts_with("https://")) || raw.starts_with("//") {
        return Err(ConfigError::BadExternalTarget {
            scope: scope.to_string(),
            target: raw.to_string(),
        });
    }
    Ok(NavigationRequest::parse(raw).into())
}

fn external_targets<'a>(
    scope: &'a str,
    table: &'a AliasTable,
) -> impl Iterator<Item = (&'a str, &'a RedirectTarget)> + 'a {
    table.iter().filter_map(move |(_, target)| match target {
        AliasTarget::External(target) => Some((scope, target)),
        AliasTarget::Internal { .. } => None,
    })
}

fn build_registry(
    scope: &str,
    routes: Vec<RouteConfig>,
    version: RegistryVersion,
    flags: &FlagRegistry,
) -> Result<RouteRegistry, ConfigError> {
    let mut registry = RouteRegistry::new();
    for route in routes {
        let id = slug_in(scope, &route.id)?;
        check_flags(scope, &route.requires, flags)?;
        let entry = RouteEntry {
            view: ViewKey(route.view),
            requires: route.requires,
        };
        if registry.insert(id, entry).is_some() {
            return Err(ConfigError::DuplicateRoute {
                scope: scope.to_string(),
                route: route.id,
                version: version.as_str(),
            });
        }
    }
    Ok(registry)
}

fn build_aliases(
    scope: &str,
    aliases: Vec<AliasConfig>,
    is_canonical: impl Fn(&Slug) -> bool,
) -> Result<AliasTable, ConfigError> {
    let mut entries = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let from = slug_in(scope, &alias.from)?;
        if is_canonical(&from) {
            return Err(ConfigError::AliasShadowsRoute {
                scope: scope.to_string(),
                alias: alias.from,
            });
        }
        let target = match (alias.to, alias.external) {
            (Some(to), None) => {
                let identifier = slug_in(scope, &to)?;
                if !is_canonical(&identifier) {
                    return Err(ConfigError::AliasTargetUnknown {
                        scope: scope.to_string(),
                        alias: alias.from,
                        target: to,
                    });
                }
                AliasTarget::Internal {
                    identifier,
                    extra_query: alias.query,
                }
            }
            (None, Some(external)) => {
                let mut target = parse_external(scope, &external)?;
                target.query.extend(alias.query);
                AliasTarget::External(target)
            }
            _ => {
                return Err(ConfigError::AliasTargetAmbiguous {
                    scope: scope.to_string(),
                    alias: alias.from,
                })
            }
        };
        entries.push((from, target));
    }
    AliasTable::new(scope, entries)
}

fn build_nav_item(
    scope: &str,
    item: NavItemConfig,
    registries: &RegistrySet,
    aliases: &AliasTable,
    flags: &FlagRegistry,
) -> Result<NavItem, ConfigError> {
    check_flags(scope, &item.requires, flags)?;
    let kind = match (item.id, item.exit) {
        (Some(id), None) => {
            let id = slug_in(scope, &id)?;
            if !registries.declares(aliases.canonical_for(&id)) {
                return Err(ConfigError::DanglingNavItem {
                    scope: scope.to_string(),
                    item: item.label,
                });
            }
            NavItemKind::Link(id)
        }
        (None, Some(exit)) => NavItemKind::Exit(parse_external(scope, &exit)?),
        _ => {
            return Err(ConfigError::NavItemAmbiguous {
                scope: scope.to_string(),
                item: item.label,
            })
        }
    };
    Ok(NavItem {
        label: item.label,
        icon: item.icon,
        kind,
        requires: item.requires,
    })
}

fn build_module(config: ModuleConfig, flags: &FlagRegistry) -> Result<ModuleNav, ConfigError> {
    let key = slug_in("catalog", &config.key)?;
    let scope = key.to_string();

    let v1 = build_registry(&scope, config.registry.v1, RegistryVersion::V1, flags)?;
    let v2 = config
        .registry
        .v2
        .map(|routes| build_registry(&scope, routes, RegistryVersion::V2, flags))
        .transpose()?;

    if let Some(flag) = &config.version_flag {
        if !flags.contains(flag) {
            return Err(ConfigError::UnknownFlag {
                scope,
                flag: flag.clone(),
            });
        }
        if v2.is_none() {
            return Err(ConfigError::MissingV2Registry(scope));
        }
    }

    let registries = RegistrySet {
        v1,
        v2,
        version_flag: config.version_flag,
    };

    let default_identifier = slug_in(&scope, &config.default)?;
    for version in [RegistryVersion::V1, RegistryVersion::V2] {
        if version == RegistryVersion::V2 && registries.v2.is_none() {
            continue;
        }
        if !registries.registry(version).contains(&default_identifier) {
            return Err(ConfigError::MissingDefault {
                scope,
                identifier: default_identifier.to_string(),
                version: version.as_str(),
            });
        }
    }

    let aliases = build_aliases(&scope, config.aliases, |id| registries.declares(id))?;

    let nav = config
        .nav
        .into_iter()
        .map(|item| build_nav_item(&scope, item, &registries, &aliases, flags))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModuleNav {
        base_path: format!("/{}", key),
        key,
        title: config.title,
        icon: config.icon,
        identifier: config.identifier,
        default_identifier,
        aliases,
        registries,
        nav,
    })
}
