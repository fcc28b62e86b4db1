//! TopHeader component - application top navigation bar.
//!
//! Contains:
//! - Sidebar toggle
//! - Application title
//! - Persona selector and demo rotation switch

pub mod persona_cycler;
pub mod persona_select;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;
use persona_cycler::PersonaCycler;
use persona_select::PersonaSelect;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Panel de gestión"</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar navegación" } else { "Mostrar navegación" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>

                <PersonaCycler />

                <div class="top-header__user">
                    {icon("user")}
                    <PersonaSelect />
                </div>
            </div>
        </div>
    }
}
