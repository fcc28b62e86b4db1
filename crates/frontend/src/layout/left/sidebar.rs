//! Sidebar: one entry per navigation module.
//!
//! Подсветка модуля вычисляется из текущего адреса через
//! `active_navigation`, ничего не хранится отдельно.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::nav::{active, catalog};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let active_nav = Memo::new(move |_| {
        let request = ctx.location.get();
        ctx.persona.with(|persona| active(&request, persona))
    });

    view! {
        <div class="app-sidebar__content">
            {catalog().modules().iter().map(|module| {
                let target = module.default_location().to_url();
                let icon_name = module.icon.as_deref().unwrap_or("item");
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || {
                            active_nav.with(|a| a.module.as_ref() == Some(&module.key))
                        }
                        style:padding-left="12px"
                        on:click=move |_| ctx.navigate(&target)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(icon_name)}
                            <span>{module.title.clone()}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
