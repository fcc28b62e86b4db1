use contracts::shared::navigation::{NavigationRequest, PersonaContext, Role};
use leptos::prelude::*;
use web_sys::window;

use crate::shared::nav::demo_personas;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Текущий адрес; единственный вход для резолвера и подсветки меню
    pub location: RwSignal<NavigationRequest>,
    pub persona: RwSignal<PersonaContext>,
    pub left_open: RwSignal<bool>,
    /// Демо-режим: персона меняется по таймеру
    pub rotating: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let persona = demo_personas()
            .into_iter()
            .next()
            .unwrap_or_else(|| PersonaContext::new("invitado", Role::Admin, "acme"));
        Self {
            location: RwSignal::new(browser_location()),
            persona: RwSignal::new(persona),
            left_open: RwSignal::new(true),
            rotating: RwSignal::new(false),
        }
    }

    /// Keeps `location` in sync with back/forward navigation.
    pub fn init_router_integration(&self) {
        let this = *self;
        let _ = window_event_listener(leptos::ev::popstate, move |_| {
            let location = browser_location();
            leptos::logging::log!("🔙 popstate: {}", location.path);
            this.location.set(location);
        });
    }

    /// User-initiated navigation inside the app (new history entry).
    pub fn navigate(&self, url: &str) {
        leptos::logging::log!("🔷 navigate: '{}'", url);
        if let Some(w) = window() {
            if let Ok(history) = w.history() {
                let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url));
            }
        }
        self.location.set(NavigationRequest::parse(url));
    }

    /// Permanent redirect: the aliased address never stays in history.
    pub fn replace(&self, url: &str) {
        leptos::logging::log!("↪️ replace: '{}'", url);
        if let Some(w) = window() {
            if let Ok(history) = w.history() {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url));
            }
        }
        self.location.set(NavigationRequest::parse(url));
    }

    /// Alias redirect from the page shell; absolute targets replace the whole document.
    pub fn redirect(&self, url: &str) {
        if leaves_app(url) {
            leptos::logging::log!("↪️ redirect out of app: '{}'", url);
            if let Some(w) = window() {
                if let Err(err) = w.location().replace(url) {
                    leptos::logging::error!("redirect to '{}' failed: {:?}", url, err);
                }
            }
        } else {
            self.replace(url);
        }
    }

    /// Exit item: absolute URLs leave the app, paths stay inside it.
    pub fn leave(&self, url: &str) {
        if leaves_app(url) {
            leptos::logging::log!("🚪 leaving app: '{}'", url);
            if let Some(w) = window() {
                let _ = w.location().set_href(url);
            }
        } else {
            self.navigate(url);
        }
    }

    pub fn set_persona(&self, persona: PersonaContext) {
        if self.persona.with_untracked(|p| *p != persona) {
            leptos::logging::log!("👤 persona: {} ({})", persona.user_id, persona.tenant);
            self.persona.set(persona);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn toggle_rotation(&self) {
        self.rotating.update(|val| *val = !*val);
    }
}

/// Absolute URL: cannot go through the History API of this origin.
pub fn leaves_app(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Reads `window.location` into a request through the same parser as in-app navigation.
fn browser_location() -> NavigationRequest {
    let Some(location) = window().map(|w| w.location()) else {
        return NavigationRequest::parse("/");
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    request_from_parts(&path, &search)
}

/// `pathname` + `search` as reported by `window.location`.
fn request_from_parts(path: &str, search: &str) -> NavigationRequest {
    NavigationRequest::parse(&format!("{}{}", path, search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_and_in_app_navigation_agree() {
        let url = "/compras?tab=pendientes&f[x]=1";
        let reloaded = request_from_parts("/compras", "?tab=pendientes&f[x]=1");
        assert_eq!(reloaded, NavigationRequest::parse(url));
        assert_eq!(reloaded.query_param("tab"), Some("pendientes"));
        assert_eq!(reloaded.query_param("f[x]"), Some("1"));

        let bare = request_from_parts("/finanzas/pagos", "");
        assert_eq!(bare.path, "/finanzas/pagos");
        assert!(bare.query.is_empty());
    }

    #[test]
    fn test_absolute_targets_leave_the_app() {
        assert!(leaves_app("https://proveedores.example.com/portal"));
        assert!(leaves_app("http://intranet.local/"));
        assert!(!leaves_app("/crm?vista=pedidos"));
        assert!(!leaves_app("/https:/x"));
    }
}
