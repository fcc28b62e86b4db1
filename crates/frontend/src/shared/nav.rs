//! Process-wide navigation tables for the browser host.
//!
//! Каталог и реестр флагов строятся один раз и дальше только читаются.

use contracts::shared::demo::PersonaRotation;
use contracts::shared::navigation::{
    execute, ActiveNavigation, FlagRegistry, NavigationCatalog, NavigationRequest,
    PersonaContext, Resolver, Role, TerminalAction,
};
use once_cell::sync::Lazy;

use crate::views::bound_views;

static FLAGS: Lazy<FlagRegistry> = Lazy::new(FlagRegistry::builtin);

static CATALOG: Lazy<NavigationCatalog> = Lazy::new(|| {
    NavigationCatalog::builtin(&FLAGS).expect("built-in navigation catalog is invalid")
});

pub fn flags() -> &'static FlagRegistry {
    &FLAGS
}

pub fn catalog() -> &'static NavigationCatalog {
    &CATALOG
}

/// Resolve + execute for the current location.
pub fn resolve(request: &NavigationRequest, persona: &PersonaContext) -> TerminalAction {
    let resolver = Resolver::new(catalog(), flags(), bound_views());
    execute(resolver.resolve(request, persona))
}

pub fn active(request: &NavigationRequest, persona: &PersonaContext) -> ActiveNavigation {
    catalog().active_navigation(request, flags(), persona)
}

/// Персоны для переключателя в шапке и демо-ротации
pub fn demo_personas() -> Vec<PersonaContext> {
    vec![
        PersonaContext::new("ana", Role::Compras, "acme"),
        PersonaContext::new("luis", Role::Finanzas, "beta-acme"),
        PersonaContext::new("eva", Role::Admin, "acme"),
        PersonaContext::new("marta", Role::Ventas, "acme"),
        PersonaContext::new("jorge", Role::Logistica, "beta-transportes"),
    ]
}

pub fn demo_rotation(period_secs: i64) -> PersonaRotation {
    PersonaRotation::new(
        demo_personas(),
        chrono::TimeDelta::seconds(period_secs),
        chrono::Utc::now(),
    )
}
