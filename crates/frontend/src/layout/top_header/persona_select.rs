use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::nav::demo_personas;

/// Переключатель персоны. Смена персоны заново разрешает текущий адрес.
#[component]
pub fn PersonaSelect() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let personas = StoredValue::new(demo_personas());

    let on_change = move |ev: leptos::ev::Event| {
        let user_id = event_target_value(&ev);
        let picked = personas.with_value(|list| list.iter().find(|p| p.user_id == user_id).cloned());
        if let Some(persona) = picked {
            ctx.set_persona(persona);
        }
    };

    view! {
        <select
            class="top-header__persona"
            on:change=on_change
            prop:value=move || ctx.persona.with(|p| p.user_id.clone())
            disabled=move || ctx.rotating.get()
        >
            {personas.get_value().into_iter().map(|persona| {
                let label = format!("{} · {} · {}", persona.user_id, persona.role.label(), persona.tenant);
                view! { <option value=persona.user_id.clone()>{label}</option> }
            }).collect_view()}
        </select>
    }
}
