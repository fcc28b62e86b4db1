//! Feature flags - named pure predicates over `PersonaContext`.
//!
//! Флаги не имеют состояния: один и тот же контекст всегда даёт один и тот же
//! ответ. Неизвестное имя флага -> `false`.

use std::collections::BTreeMap;

use super::persona::{PersonaContext, Role};

pub type FlagFn = fn(&PersonaContext) -> bool;

pub const COMPRAS_REGISTRY_V2: &str = "compras_registry_v2";
pub const FINANZAS_REGISTRY_V2: &str = "finanzas_registry_v2";
pub const CAP_APROBACIONES: &str = "cap_aprobaciones";
pub const CAP_ANALITICA: &str = "cap_analitica";
pub const CAP_TESORERIA: &str = "cap_tesoreria";
pub const CAP_CONCILIACION: &str = "cap_conciliacion";
pub const CAP_FLOTA: &str = "cap_flota";
pub const PORTAL_PROVEEDORES: &str = "portal_proveedores";

/// Table of named flags.
#[derive(Clone, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<&'static str, FlagFn>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags used by the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(COMPRAS_REGISTRY_V2, |ctx| ctx.is_beta_tenant());
        registry.register(FINANZAS_REGISTRY_V2, |ctx| {
            ctx.is_beta_tenant() && matches!(ctx.role, Role::Admin | Role::Finanzas)
        });
        registry.register(CAP_APROBACIONES, |ctx| {
            matches!(ctx.role, Role::Admin | Role::Compras)
        });
        registry.register(CAP_ANALITICA, |ctx| {
            matches!(ctx.role, Role::Admin | Role::Compras | Role::Finanzas)
        });
        registry.register(CAP_TESORERIA, |ctx| {
            matches!(ctx.role, Role::Admin | Role::Finanzas)
        });
        registry.register(CAP_CONCILIACION, |ctx| {
            matches!(ctx.role, Role::Admin | Role::Finanzas)
        });
        registry.register(CAP_FLOTA, |ctx| {
            matches!(ctx.role, Role::Admin | Role::Logistica)
        });
        registry.register(PORTAL_PROVEEDORES, |ctx| ctx.role != Role::Ventas);
        registry
    }

    pub fn register(&mut self, name: &'static str, flag: FlagFn) {
        self.flags.insert(name, flag);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags.keys().copied()
    }

    pub fn is_enabled(&self, name: &str, ctx: &PersonaContext) -> bool {
        match self.flags.get(name) {
            Some(flag) => flag(ctx),
            None => {
                log::debug!("unknown feature flag '{}', treating as disabled", name);
                false
            }
        }
    }

    /// All flags must pass; an empty list passes.
    pub fn all_enabled<S: AsRef<str>>(&self, names: &[S], ctx: &PersonaContext) -> bool {
        names.iter().all(|name| self.is_enabled(name.as_ref(), ctx))
    }
}

impl std::fmt::Debug for FlagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.flags.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contexts() -> Vec<PersonaContext> {
        let mut out = Vec::new();
        for role in Role::ALL {
            for tenant in ["acme", "beta-acme", ""] {
                out.push(PersonaContext::new("u1", role, tenant));
            }
        }
        out
    }

    #[test]
    fn test_unknown_flag_is_disabled() {
        let flags = FlagRegistry::builtin();
        for ctx in contexts() {
            assert!(!flags.is_enabled("no_such_flag", &ctx));
        }
    }

    #[test]
    fn test_flags_are_deterministic() {
        let flags = FlagRegistry::builtin();
        for ctx in contexts() {
            for name in flags.names() {
                let first = flags.is_enabled(name, &ctx);
                for _ in 0..3 {
                    assert_eq!(flags.is_enabled(name, &ctx), first, "flag {}", name);
                }
            }
        }
    }

    #[test]
    fn test_registry_v2_follows_tenant() {
        let flags = FlagRegistry::builtin();
        let beta = PersonaContext::new("u1", Role::Compras, "beta-acme");
        let regular = PersonaContext::new("u1", Role::Compras, "acme");
        assert!(flags.is_enabled(COMPRAS_REGISTRY_V2, &beta));
        assert!(!flags.is_enabled(COMPRAS_REGISTRY_V2, &regular));
    }

    #[test]
    fn test_all_enabled() {
        let flags = FlagRegistry::builtin();
        let ctx = PersonaContext::new("u1", Role::Finanzas, "acme");
        assert!(flags.all_enabled::<&str>(&[], &ctx));
        assert!(flags.all_enabled(&[CAP_TESORERIA, CAP_CONCILIACION], &ctx));
        assert!(!flags.all_enabled(&[CAP_TESORERIA, CAP_FLOTA], &ctx));
        assert!(!flags.all_enabled(&[CAP_TESORERIA, "missing"], &ctx));
    }
}
