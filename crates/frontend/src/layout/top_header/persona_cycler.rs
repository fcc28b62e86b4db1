//! Демо-режим: персона меняется каждые `ROTATION_PERIOD_SECS` секунд.

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::nav::demo_rotation;

const ROTATION_PERIOD_SECS: i64 = 20;
const TICK_MS: u32 = 1000;

#[component]
pub fn PersonaCycler() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    // Каждый запуск получает свой номер; старый цикл видит чужой номер и выходит
    let generation = StoredValue::new(0u64);

    let start = move || {
        generation.update_value(|g| *g += 1);
        let my_generation = generation.get_value();
        let rotation = demo_rotation(ROTATION_PERIOD_SECS);
        leptos::logging::log!("🔁 persona rotation started ({}s)", ROTATION_PERIOD_SECS);

        spawn_local(async move {
            loop {
                if !ctx.rotating.get_untracked() || generation.get_value() != my_generation {
                    leptos::logging::log!("⏹ persona rotation stopped");
                    break;
                }
                if let Some(persona) = rotation.current(Utc::now()) {
                    ctx.set_persona(persona.clone());
                }
                TimeoutFuture::new(TICK_MS).await;
            }
        });
    };

    let on_click = move |_| {
        ctx.toggle_rotation();
        if ctx.rotating.get_untracked() {
            start();
        }
    };

    view! {
        <Button
            size=ButtonSize::Small
            appearance=ButtonAppearance::Secondary
            on_click=on_click
        >
            {move || if ctx.rotating.get() { "Detener demo" } else { "Demo de personas" }}
        </Button>
    }
}
