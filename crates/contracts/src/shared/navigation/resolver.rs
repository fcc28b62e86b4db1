//! Resolution pipeline
//!
//! location + persona -> `ResolutionResult`. Два прохода: сначала первый
//! сегмент пути (модуль верхнего уровня, может быть устаревшим алиасом),
//! затем идентификатор внутри модуля. Каждый проход: валидация -> алиас ->
//! выбор версии реестра -> поиск -> проверка привязки вью.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use super::alias::{resolve_alias, AliasOutcome};
use super::catalog::{ModuleNav, NavigationCatalog};
use super::config::IdentifierSource;
use super::error::ErrorCode;
use super::flags::FlagRegistry;
use super::location::{NavigationRequest, QueryMap, RedirectTarget};
use super::persona::PersonaContext;
use super::registry::{RegistryVersion, ViewKey};
use super::slug::{validate, InvalidIdentifier, Slug};

/// Views the rendering layer can actually mount.
pub trait ViewBindings {
    fn is_bound(&self, view: &ViewKey) -> bool;
}

impl ViewBindings for BTreeSet<ViewKey> {
    fn is_bound(&self, view: &ViewKey) -> bool {
        self.contains(view)
    }
}

impl ViewBindings for HashSet<ViewKey> {
    fn is_bound(&self, view: &ViewKey) -> bool {
        self.contains(view)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTarget {
    pub module: Slug,
    pub identifier: Slug,
    pub view: ViewKey,
    pub version: RegistryVersion,
    pub query: QueryMap,
    /// Path segments after the identifier (detail ids etc.)
    pub tail: Vec<String>,
    pub persona: PersonaContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionError {
    pub code: ErrorCode,
    pub message: String,
    pub fallback: RedirectTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolutionResult {
    Redirect(RedirectTarget),
    Render(RenderTarget),
    Error(ResolutionError),
}

pub struct Resolver<'a> {
    catalog: &'a NavigationCatalog,
    flags: &'a FlagRegistry,
    views: &'a dyn ViewBindings,
}

impl<'a> Resolver<'a> {
    pub fn new(
        catalog: &'a NavigationCatalog,
        flags: &'a FlagRegistry,
        views: &'a dyn ViewBindings,
    ) -> Self {
        Self {
            catalog,
            flags,
            views,
        }
    }

    pub fn resolve(&self, request: &NavigationRequest, ctx: &PersonaContext) -> ResolutionResult {
        let result = self.resolve_top_level(request, ctx);
        match &result {
            ResolutionResult::Redirect(target) => {
                log::debug!("navigation {} -> redirect {}", request.path, target)
            }
            ResolutionResult::Render(render) => {
                log::debug!("navigation {} -> render {}", request.path, render.view)
            }
            ResolutionResult::Error(error) => {
                log::warn!("navigation {} -> {}: {}", request.path, error.code, error.message)
            }
        }
        result
    }

    fn resolve_top_level(
        &self,
        request: &NavigationRequest,
        ctx: &PersonaContext,
    ) -> ResolutionResult {
        let home = self.catalog.home();
        let Some(first) = request.segments().next() else {
            return self.resolve_in_module(home, request, ctx);
        };

        let key = match validate(first) {
            Ok(key) => key,
            Err(err) => return invalid(err, home.default_location()),
        };

        match resolve_alias(&key, self.catalog.aliases()) {
            AliasOutcome::NotAliased => {}
            AliasOutcome::InternalRedirect {
                identifier,
                extra_query,
            } => {
                let mut path = format!("/{}", identifier);
                for segment in request.segments().skip(1) {
                    path.push('/');
                    path.push_str(segment);
                }
                let mut query = request.query.clone();
                query.extend(extra_query.iter().map(|(k, v)| (k.clone(), v.clone())));
                let moved = NavigationRequest::new(path, query);
                return ResolutionResult::Redirect(self.settle_in_module(identifier, moved));
            }
            AliasOutcome::ExternalRedirect(target) => {
                return ResolutionResult::Redirect(target.clone());
            }
        }

        match self.catalog.module(key.as_str()) {
            Some(module) => self.resolve_in_module(module, request, ctx),
            None => ResolutionResult::Error(ResolutionError {
                code: ErrorCode::UnknownRoute,
                message: format!("El módulo «{}» no existe", key),
                fallback: home.default_location(),
            }),
        }
    }

    fn resolve_in_module(
        &self,
        module: &ModuleNav,
        request: &NavigationRequest,
        ctx: &PersonaContext,
    ) -> ResolutionResult {
        let identifier = match module.raw_identifier(request) {
            None => module.default_identifier.clone(),
            Some(raw) => match validate(raw) {
                Ok(identifier) => identifier,
                Err(err) => return invalid(err, module.default_location()),
            },
        };

        match resolve_alias(&identifier, &module.aliases) {
            AliasOutcome::NotAliased => {}
            AliasOutcome::InternalRedirect {
                identifier: canonical,
                extra_query,
            } => {
                log::debug!("{}: alias '{}' -> '{}'", module.key, identifier, canonical);
                return ResolutionResult::Redirect(module.location_for(
                    canonical,
                    request,
                    extra_query,
                ));
            }
            AliasOutcome::ExternalRedirect(target) => {
                log::debug!("{}: alias '{}' moved to {}", module.key, identifier, target);
                return ResolutionResult::Redirect(target.clone());
            }
        }

        let version = module.registries.select_version(self.flags, ctx);
        log::debug!("{}: registry {} selected", module.key, version.as_str());
        let fallback = self.fallback_for(module, &identifier);

        let Some(entry) = module
            .registries
            .lookup(&identifier, version, self.flags, ctx)
        else {
            return ResolutionResult::Error(ResolutionError {
                code: ErrorCode::UnknownRoute,
                message: format!(
                    "La sección «{}» no está disponible en {}",
                    identifier, module.title
                ),
                fallback,
            });
        };

        if !self.views.is_bound(&entry.view) {
            return ResolutionResult::Error(ResolutionError {
                code: ErrorCode::MissingViewBinding,
                message: format!("La vista «{}» no está registrada", entry.view),
                fallback,
            });
        }

        let skip = match module.identifier {
            IdentifierSource::Query(_) => 1,
            IdentifierSource::Segment => 2,
        };

        ResolutionResult::Render(RenderTarget {
            module: module.key.clone(),
            identifier,
            view: entry.view.clone(),
            version,
            query: request.query.clone(),
            tail: request.segments().skip(skip).map(str::to_string).collect(),
            persona: ctx.clone(),
        })
    }

    /// Legacy module path already rewritten to `key`: one lookup in the
    /// module's own alias table so the caller gets a single redirect.
    ///
    /// Invalid or unknown identifiers are left for the next resolution to report.
    fn settle_in_module(&self, key: &Slug, moved: NavigationRequest) -> RedirectTarget {
        let Some(module) = self.catalog.module(key.as_str()) else {
            return moved.into();
        };
        let Some(identifier) = module.raw_identifier(&moved).and_then(|raw| validate(raw).ok())
        else {
            return moved.into();
        };

        match resolve_alias(&identifier, &module.aliases) {
            AliasOutcome::NotAliased => moved.into(),
            AliasOutcome::InternalRedirect {
                identifier: canonical,
                extra_query,
            } => module.location_for(canonical, &moved, extra_query),
            AliasOutcome::ExternalRedirect(target) => target.clone(),
        }
    }

    /// Module default, or home when the default itself is what failed.
    fn fallback_for(&self, module: &ModuleNav, identifier: &Slug) -> RedirectTarget {
        if identifier == &module.default_identifier {
            self.catalog.home().default_location()
        } else {
            module.default_location()
        }
    }
}

fn invalid(err: InvalidIdentifier, fallback: RedirectTarget) -> ResolutionResult {
    ResolutionResult::Error(ResolutionError {
        code: err.code(),
        message: err.message(),
        fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::navigation::persona::Role;

    struct Fixture {
        catalog: NavigationCatalog,
        flags: FlagRegistry,
        views: BTreeSet<ViewKey>,
    }

    impl Fixture {
        fn new() -> Self {
            let flags = FlagRegistry::builtin();
            let catalog = NavigationCatalog::builtin(&flags).unwrap();
            let views = catalog.views().into_iter().cloned().collect();
            Self {
                catalog,
                flags,
                views,
            }
        }

        fn resolve(&self, url: &str, ctx: &PersonaContext) -> ResolutionResult {
            Resolver::new(&self.catalog, &self.flags, &self.views)
                .resolve(&NavigationRequest::parse(url), ctx)
        }
    }

    fn comprador() -> PersonaContext {
        PersonaContext::new("u1", Role::Compras, "acme")
    }

    fn beta_comprador() -> PersonaContext {
        PersonaContext::new("u1", Role::Compras, "beta-acme")
    }

    fn redirect_url(result: &ResolutionResult) -> String {
        match result {
            ResolutionResult::Redirect(target) => target.to_url(),
            other => panic!("expected redirect, got {:?}", other),
        }
    }

    fn render(result: &ResolutionResult) -> &RenderTarget {
        match result {
            ResolutionResult::Render(target) => target,
            other => panic!("expected render, got {:?}", other),
        }
    }

    fn error(result: &ResolutionResult) -> &ResolutionError {
        match result {
            ResolutionResult::Error(error) => error,
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_tab_redirects_with_preset() {
        let fx = Fixture::new();
        let result = fx.resolve("/compras?tab=pendientes", &comprador());
        assert_eq!(
            redirect_url(&result),
            "/compras?preset=pending_approval&tab=action-center"
        );

        let canonical = fx.resolve(&redirect_url(&result), &comprador());
        let target = render(&canonical);
        assert_eq!(target.identifier.as_str(), "action-center");
        assert_eq!(target.view.as_str(), "compras.action_center");
        assert_eq!(target.query.get("preset").map(String::as_str), Some("pending_approval"));
    }

    #[test]
    fn test_cross_module_move_redirects_externally() {
        let fx = Fixture::new();
        let result = fx.resolve("/compras?tab=pedidos-multicanal", &comprador());
        assert_eq!(redirect_url(&result), "/crm?canal=multicanal&vista=pedidos");
    }

    #[test]
    fn test_invalid_identifier_falls_back_to_module_default() {
        let fx = Fixture::new();
        let result = fx.resolve("/compras?tab=%C3%91O%C3%91O!!", &comprador());
        let err = error(&result);
        assert_eq!(err.code, ErrorCode::InvalidIdentifier);
        assert!(err.message.contains("ÑOÑO!!"));
        assert_eq!(err.fallback.to_url(), "/compras?tab=resumen");
    }

    #[test]
    fn test_v2_registry_has_no_v1_fallback() {
        let fx = Fixture::new();
        let v1 = fx.resolve("/compras?tab=recepciones", &comprador());
        assert_eq!(render(&v1).version, RegistryVersion::V1);

        let v2 = fx.resolve("/compras?tab=recepciones", &beta_comprador());
        let err = error(&v2);
        assert_eq!(err.code, ErrorCode::UnknownRoute);
        assert_eq!(err.fallback.to_url(), "/compras?tab=resumen");
    }

    #[test]
    fn test_capability_failure_is_unknown_route() {
        let fx = Fixture::new();
        let ventas = PersonaContext::new("u9", Role::Ventas, "acme");
        let result = fx.resolve("/compras?tab=action-center", &ventas);
        assert_eq!(error(&result).code, ErrorCode::UnknownRoute);
    }

    #[test]
    fn test_missing_view_binding() {
        let mut fx = Fixture::new();
        fx.views.remove(&ViewKey::from("finanzas.pagos"));
        let admin = PersonaContext::new("u1", Role::Admin, "acme");
        let result = fx.resolve("/finanzas/pagos", &admin);
        let err = error(&result);
        assert_eq!(err.code, ErrorCode::MissingViewBinding);
        assert_eq!(err.fallback.to_url(), "/finanzas/panel");
    }

    #[test]
    fn test_default_failure_falls_back_to_home() {
        let mut fx = Fixture::new();
        fx.views.remove(&ViewKey::from("finanzas.panel"));
        let admin = PersonaContext::new("u1", Role::Admin, "acme");
        let result = fx.resolve("/finanzas", &admin);
        assert_eq!(error(&result).fallback.to_url(), "/inicio/resumen");
    }

    #[test]
    fn test_missing_identifier_renders_default() {
        let fx = Fixture::new();
        let target = fx.resolve("/compras", &comprador());
        assert_eq!(render(&target).identifier.as_str(), "resumen");

        let root = fx.resolve("/", &comprador());
        assert_eq!(render(&root).view.as_str(), "inicio.resumen");
    }

    #[test]
    fn test_segment_module_alias_keeps_tail() {
        let fx = Fixture::new();
        let admin = PersonaContext::new("u1", Role::Admin, "acme");
        let result = fx.resolve("/finanzas/cuentas-por-pagar/F-7?orden=fecha", &admin);
        assert_eq!(
            redirect_url(&result),
            "/finanzas/pagos/F-7?estado=pendiente&orden=fecha"
        );
        let detail = fx.resolve("/finanzas/facturas/F-7", &admin);
        assert_eq!(render(&detail).tail, vec!["F-7".to_string()]);
    }

    #[test]
    fn test_top_level_alias_redirects() {
        let fx = Fixture::new();
        let result = fx.resolve("/ventas?vista=pedidos", &comprador());
        assert_eq!(redirect_url(&result), "/crm?vista=pedidos");

        let external = fx.resolve("/tesoreria", &comprador());
        assert_eq!(redirect_url(&external), "/finanzas/tesoreria");
    }

    #[test]
    fn test_legacy_module_and_legacy_identifier_redirect_once() {
        let fx = Fixture::new();
        let admin = PersonaContext::new("u1", Role::Admin, "acme");
        for (url, expected) in [
            ("/ventas?vista=cuentas", "/crm?vista=clientes"),
            ("/logistica/mapa", "/rutas/monitor"),
            ("/logistica/mapa/R-12?zona=norte", "/rutas/monitor/R-12?zona=norte"),
        ] {
            let first = fx.resolve(url, &admin);
            assert_eq!(redirect_url(&first), expected, "{}", url);
            let second = fx.resolve(&redirect_url(&first), &admin);
            assert!(
                matches!(second, ResolutionResult::Render(_)),
                "{} needed a second hop: {:?}",
                url,
                second
            );
        }
    }

    #[test]
    fn test_legacy_module_with_bad_identifier_still_redirects_once() {
        let fx = Fixture::new();
        let result = fx.resolve("/ventas?vista=Mal!", &comprador());
        assert_eq!(redirect_url(&result), "/crm?vista=Mal%21");
        let next = fx.resolve(&redirect_url(&result), &comprador());
        assert_eq!(error(&next).code, ErrorCode::InvalidIdentifier);
    }

    #[test]
    fn test_unknown_and_invalid_module() {
        let fx = Fixture::new();
        let unknown = fx.resolve("/almacen", &comprador());
        let err = error(&unknown);
        assert_eq!(err.code, ErrorCode::UnknownRoute);
        assert_eq!(err.fallback.to_url(), "/inicio/resumen");

        let invalid = fx.resolve("/Compras", &comprador());
        assert_eq!(error(&invalid).code, ErrorCode::InvalidIdentifier);
    }

    #[test]
    fn test_empty_query_identifier_is_invalid() {
        let fx = Fixture::new();
        let result = fx.resolve("/crm?vista=", &comprador());
        assert_eq!(error(&result).code, ErrorCode::InvalidIdentifier);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let fx = Fixture::new();
        let personas = [
            comprador(),
            beta_comprador(),
            PersonaContext::new("u2", Role::Finanzas, "beta-acme"),
            PersonaContext::new("u3", Role::Ventas, "acme"),
        ];
        let urls = [
            "/",
            "/compras?tab=pendientes",
            "/compras?tab=pedidos-multicanal",
            "/compras?tab=recepciones",
            "/compras?tab=..%2F",
            "/finanzas/tesoreria",
            "/finanzas/gastos",
            "/ventas",
            "/rutas/flota",
            "/nada",
        ];
        for ctx in &personas {
            for url in urls {
                assert_eq!(fx.resolve(url, ctx), fx.resolve(url, ctx), "{}", url);
            }
        }
    }
}
