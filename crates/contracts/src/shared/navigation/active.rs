//! Active-item derivation for the sidebar and sub-navigation.
//!
//! "Активность" пункта меню никогда не хранится: она вычисляется заново из
//! текущего пути и query-параметров на каждый рендер навигации.

use serde::Serialize;

use super::alias::{resolve_alias, AliasOutcome, AliasTable};
use super::catalog::{ModuleNav, NavItem, NavItemKind, NavigationCatalog};
use super::flags::FlagRegistry;
use super::location::NavigationRequest;
use super::persona::PersonaContext;
use super::slug::{validate, Slug};

/// Highlighting state handed to the navigation renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveNavigation {
    pub module: Option<Slug>,
    /// Label of the highlighted sub-navigation item
    pub sub_item: Option<String>,
}

/// First module whose base path prefixes `request.path`.
///
/// `/` is the home module, the one it renders. Legacy top-level paths
/// (`/ventas`) highlight the module they alias to.
pub fn derive_active_module<'c>(
    catalog: &'c NavigationCatalog,
    request: &NavigationRequest,
) -> Option<&'c ModuleNav> {
    if request.segments().next().is_none() {
        return Some(catalog.home());
    }

    if let Some(module) = catalog
        .modules()
        .iter()
        .find(|m| m.matches_path(&request.path))
    {
        return Some(module);
    }

    let first = validate(request.segments().next()?).ok()?;
    match resolve_alias(&first, catalog.aliases()) {
        AliasOutcome::InternalRedirect { identifier, .. } => catalog.module(identifier.as_str()),
        AliasOutcome::ExternalRedirect(target) => catalog
            .modules()
            .iter()
            .find(|m| m.matches_path(&target.path)),
        AliasOutcome::NotAliased => None,
    }
}

/// Sub-navigation variant exposed to `ctx`.
///
/// Link items survive only when their route is available in the registry
/// selected for `ctx`; exit items need their own `requires` flags.
pub fn visible_nav_items<'m>(
    module: &'m ModuleNav,
    flags: &FlagRegistry,
    ctx: &PersonaContext,
) -> Vec<&'m NavItem> {
    let version = module.registries.select_version(flags, ctx);
    module
        .nav
        .iter()
        .filter(|item| flags.all_enabled(&item.requires, ctx))
        .filter(|item| match &item.kind {
            NavItemKind::Link(id) => {
                let canonical = module.aliases.canonical_for(id);
                module
                    .registries
                    .lookup(canonical, version, flags, ctx)
                    .is_some()
            }
            NavItemKind::Exit(_) => true,
        })
        .collect()
}

/// Item to highlight inside `module`.
///
/// Never `None` while `items` holds at least one link: unmatched identifiers
/// fall back to the first link item.
pub fn derive_active_sub_item<'i>(
    module: &ModuleNav,
    request: &NavigationRequest,
    items: &[&'i NavItem],
    aliases: &AliasTable,
) -> Option<&'i NavItem> {
    let current = match module.raw_identifier(request).map(validate) {
        None => Some(module.default_identifier.clone()),
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => None,
    };

    let resolved = current.as_ref().map(|id| match resolve_alias(id, aliases) {
        AliasOutcome::InternalRedirect { identifier, .. } => identifier,
        AliasOutcome::NotAliased | AliasOutcome::ExternalRedirect(_) => id,
    });

    if let Some(resolved) = resolved {
        let hit = items.iter().copied().find(|item| match item.identifier() {
            Some(id) => id == resolved || aliases.canonical_for(id) == resolved,
            None => false,
        });
        if hit.is_some() {
            return hit;
        }
    }

    items
        .iter()
        .copied()
        .find(|item| !item.is_exit())
        .or_else(|| items.first().copied())
}

impl NavigationCatalog {
    /// Active module and sub-item for the current location and persona.
    pub fn active_navigation(
        &self,
        request: &NavigationRequest,
        flags: &FlagRegistry,
        ctx: &PersonaContext,
    ) -> ActiveNavigation {
        let Some(module) = derive_active_module(self, request) else {
            return ActiveNavigation::default();
        };
        let items = visible_nav_items(module, flags, ctx);
        let sub_item = derive_active_sub_item(module, request, &items, &module.aliases)
            .map(|item| item.label.clone());
        ActiveNavigation {
            module: Some(module.key.clone()),
            sub_item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::persona::Role;

    fn setup() -> (NavigationCatalog, FlagRegistry) {
        let flags = FlagRegistry::builtin();
        let catalog = NavigationCatalog::builtin(&flags).unwrap();
        (catalog, flags)
    }

    fn active(url: &str, ctx: &PersonaContext) -> ActiveNavigation {
        let (catalog, flags) = setup();
        catalog.active_navigation(&NavigationRequest::parse(url), &flags, ctx)
    }

    fn labels(items: &[&NavItem]) -> Vec<String> {
        items.iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn test_module_prefix_match() {
        let (catalog, _) = setup();
        let module = |url: &str| {
            derive_active_module(&catalog, &NavigationRequest::parse(url))
                .map(|m| m.key.to_string())
        };
        assert_eq!(module("/compras?tab=ordenes"), Some("compras".into()));
        assert_eq!(module("/finanzas/pagos/F-1"), Some("finanzas".into()));
        assert_eq!(module("/comprasx"), None);
        assert_eq!(module("/"), Some("inicio".into()));
        assert_eq!(module(""), Some("inicio".into()));
        assert_eq!(module("/ÑOÑO"), None);
    }

    #[test]
    fn test_module_through_legacy_path() {
        let (catalog, _) = setup();
        let module = |url: &str| {
            derive_active_module(&catalog, &NavigationRequest::parse(url))
                .map(|m| m.key.to_string())
        };
        assert_eq!(module("/ventas"), Some("crm".into()));
        assert_eq!(module("/tesoreria"), Some("finanzas".into()));
    }

    #[test]
    fn test_legacy_tab_highlights_canonical_item() {
        let ctx = PersonaContext::new("u1", Role::Compras, "acme");
        let nav = active("/compras?tab=pendientes", &ctx);
        assert_eq!(nav.module.as_ref().map(Slug::as_str), Some("compras"));
        assert_eq!(nav.sub_item.as_deref(), Some("Centro de acciones"));
        assert_eq!(
            active("/compras?tab=action-center", &ctx).sub_item,
            nav.sub_item
        );
    }

    #[test]
    fn test_unmatched_falls_back_to_first_item() {
        let ctx = PersonaContext::new("u1", Role::Compras, "acme");
        for url in ["/compras?tab=desconocido", "/compras?tab=%C3%91", "/compras?tab=pedidos-multicanal"] {
            assert_eq!(active(url, &ctx).sub_item.as_deref(), Some("Resumen"), "{}", url);
        }
        assert_eq!(
            active("/compras", &ctx).sub_item.as_deref(),
            Some("Resumen")
        );
    }

    #[test]
    fn test_visible_items_follow_registry_version() {
        let (catalog, flags) = setup();
        let compras = catalog.module("compras").unwrap();

        let v1 = PersonaContext::new("u1", Role::Compras, "acme");
        assert_eq!(
            labels(&visible_nav_items(compras, &flags, &v1)),
            vec![
                "Resumen",
                "Órdenes de compra",
                "Proveedores",
                "Centro de acciones",
                "Recepciones",
                "Portal de proveedores",
            ]
        );

        let v2 = PersonaContext::new("u1", Role::Compras, "beta-acme");
        assert_eq!(
            labels(&visible_nav_items(compras, &flags, &v2)),
            vec![
                "Resumen",
                "Órdenes de compra",
                "Proveedores",
                "Centro de acciones",
                "Analítica",
                "Portal de proveedores",
            ]
        );

        let ventas = PersonaContext::new("u2", Role::Ventas, "acme");
        assert_eq!(
            labels(&visible_nav_items(compras, &flags, &ventas)),
            vec!["Resumen", "Órdenes de compra", "Proveedores", "Recepciones"]
        );
    }

    #[test]
    fn test_hidden_item_is_not_highlighted() {
        // Recepciones is hidden in v2, so the fallback applies
        let ctx = PersonaContext::new("u1", Role::Compras, "beta-acme");
        assert_eq!(
            active("/compras?tab=recepciones", &ctx).sub_item.as_deref(),
            Some("Resumen")
        );
    }

    #[test]
    fn test_reverse_alias_on_item() {
        let (catalog, _) = setup();
        let compras = catalog.module("compras").unwrap();
        let legacy_item = NavItem {
            label: "Pendientes".into(),
            icon: None,
            kind: NavItemKind::Link(validate("pendientes").unwrap()),
            requires: Vec::new(),
        };
        let other = NavItem {
            label: "Resumen".into(),
            icon: None,
            kind: NavItemKind::Link(validate("resumen").unwrap()),
            requires: Vec::new(),
        };
        let items = [&other, &legacy_item];
        let request = NavigationRequest::parse("/compras?tab=action-center");
        let hit = derive_active_sub_item(compras, &request, &items, &compras.aliases);
        assert_eq!(hit.map(|i| i.label.as_str()), Some("Pendientes"));
    }

    #[test]
    fn test_fallback_never_empty_when_module_active() {
        let (catalog, flags) = setup();
        let personas = Role::ALL.map(|role| PersonaContext::new("u", role, "beta-acme"));
        let urls = [
            "/inicio/otra",
            "/crm?vista=zzz",
            "/compras?tab=",
            "/finanzas/../x",
            "/rutas/flota",
            "/ventas",
        ];
        for ctx in &personas {
            for url in urls {
                let request = NavigationRequest::parse(url);
                let Some(module) = derive_active_module(&catalog, &request) else {
                    continue;
                };
                let items = visible_nav_items(module, &flags, ctx);
                if items.is_empty() {
                    continue;
                }
                assert!(
                    derive_active_sub_item(module, &request, &items, &module.aliases).is_some(),
                    "{} for {:?}",
                    url,
                    ctx.role
                );
            }
        }
    }

    #[test]
    fn test_landing_page_highlights_home() {
        let ctx = PersonaContext::new("u1", Role::Compras, "acme");
        let nav = active("/", &ctx);
        assert_eq!(nav.module.as_ref().map(Slug::as_str), Some("inicio"));
        assert_eq!(nav.sub_item.as_deref(), Some("Resumen"));
    }

    #[test]
    fn test_no_module_no_highlight() {
        let ctx = PersonaContext::new("u1", Role::Admin, "acme");
        assert_eq!(active("/almacen", &ctx), ActiveNavigation::default());
    }
}
