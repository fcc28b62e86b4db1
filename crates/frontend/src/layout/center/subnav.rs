//! Sub-navigation of the active module.
//!
//! Набор пунктов зависит от персоны (флаги, версия реестра), подсвеченный
//! пункт от адреса. Пункты «выхода» идут через `ExitGuard`: двойной клик
//! не порождает второй редирект.

use contracts::shared::navigation::{
    derive_active_module, derive_active_sub_item, visible_nav_items, ExitGuard, ModuleNav,
    NavItem, NavItemKind, NavigationRequest, QueryMap, SystemClock,
};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::nav::{catalog, flags};

/// Clean location of a link item: module base path, no carried query.
fn link_url(module: &ModuleNav, item: &NavItem) -> Option<String> {
    let NavItemKind::Link(id) = &item.kind else {
        return None;
    };
    let base = NavigationRequest::new(module.base_path.clone(), QueryMap::new());
    Some(module.location_for(id, &base, &QueryMap::new()).to_url())
}

#[component]
pub fn SubNav() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let guard = StoredValue::new(ExitGuard::<SystemClock>::system());

    let on_item = move |module: &'static ModuleNav, item: &'static NavItem| match &item.kind {
        NavItemKind::Link(_) => {
            if let Some(url) = link_url(module, item) {
                ctx.navigate(&url);
            }
        }
        NavItemKind::Exit(target) => {
            let mut accepted = None;
            guard.update_value(|g| accepted = g.try_exit(target));
            match accepted {
                Some(target) => ctx.leave(&target.to_url()),
                None => leptos::logging::log!("⏳ exit '{}' ignored, guard latched", item.label),
            }
        }
    };

    move || {
        let request = ctx.location.get();
        let persona = ctx.persona.get();
        let Some(module) = derive_active_module(catalog(), &request) else {
            return view! { <nav class="app-subnav app-subnav--empty"></nav> }.into_any();
        };
        let items = visible_nav_items(module, flags(), &persona);
        let active_label = derive_active_sub_item(module, &request, &items, &module.aliases)
            .map(|item| item.label.clone());

        view! {
            <nav class="app-subnav">
                <span class="app-subnav__title">{module.title.clone()}</span>
                {items.into_iter().map(|item| {
                    let is_active = active_label.as_deref() == Some(item.label.as_str());
                    view! {
                        <div
                            class="app-subnav__item"
                            class:app-subnav__item--active=is_active
                            class:app-subnav__item--exit=item.is_exit()
                            on:click=move |_| on_item(module, item)
                        >
                            {item.icon.as_deref().map(icon)}
                            <span>{item.label.clone()}</span>
                            {item.is_exit().then(|| icon("external-link"))}
                        </div>
                    }
                }).collect_view()}
            </nav>
        }
        .into_any()
    }
}
