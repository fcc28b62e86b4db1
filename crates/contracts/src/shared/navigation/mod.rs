//! Navigation resolution engine
//!
//! Общий для всех модулей (compras, finanzas, глобальный layout) механизм:
//! по пути и query-параметрам решает, какую вью показать, нужен ли
//! постоянный редирект со старого идентификатора, и какие пункты
//! подменю видны и подсвечены.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::navigation::*;
//!
//! let flags = FlagRegistry::builtin();
//! let catalog = NavigationCatalog::builtin(&flags)?;
//! let views: BTreeSet<ViewKey> = catalog.views().into_iter().cloned().collect();
//!
//! let request = NavigationRequest::parse("/compras?tab=pendientes");
//! let ctx = PersonaContext::new("u1", Role::Compras, "acme");
//! let action = execute(Resolver::new(&catalog, &flags, &views).resolve(&request, &ctx));
//! let active = catalog.active_navigation(&request, &flags, &ctx);
//! ```

mod active;
mod alias;
mod catalog;
mod config;
mod error;
mod executor;
mod exit_guard;
pub mod flags;
mod location;
mod persona;
mod registry;
mod resolver;
mod slug;

pub use active::{derive_active_module, derive_active_sub_item, visible_nav_items, ActiveNavigation};
pub use alias::{resolve_alias, AliasOutcome, AliasTable, AliasTarget};
pub use catalog::{ModuleNav, NavItem, NavItemKind, NavigationCatalog};
pub use config::{
    parse_catalog, AliasConfig, CatalogConfig, IdentifierSource, ModuleConfig, NavItemConfig,
    RegistryConfig, RouteConfig, DEFAULT_CATALOG,
};
pub use error::{ConfigError, ErrorCode};
pub use executor::{execute, ErrorReport, FallbackAction, TerminalAction, PERMANENT_REDIRECT};
pub use exit_guard::{Clock, ExitGuard, ManualClock, SystemClock, DEFAULT_EXIT_COOLDOWN_MS};
pub use flags::{FlagFn, FlagRegistry};
pub use location::{NavigationRequest, QueryMap, RedirectTarget};
pub use persona::{select_dashboard_variant, DashboardVariant, PersonaContext, Role};
pub use registry::{RegistrySet, RegistryVersion, RouteEntry, RouteRegistry, ViewKey};
pub use resolver::{RenderTarget, ResolutionError, ResolutionResult, Resolver, ViewBindings};
pub use slug::{validate, InvalidIdentifier, Slug, INVALID_IDENTIFIER_TEMPLATE};
