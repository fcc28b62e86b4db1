//! PageShell - исполняет `TerminalAction` для текущего адреса и персоны.

use contracts::shared::navigation::TerminalAction;
use leptos::logging::log;
use leptos::prelude::*;

use super::error_panel::ErrorPanel;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::nav::resolve;
use crate::views::render_view;

#[component]
pub fn PageShell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let action = Memo::new(move |_| {
        let request = ctx.location.get();
        ctx.persona.with(|persona| resolve(&request, persona))
    });

    // Редирект заменяет запись в history (или весь документ для https://)
    Effect::new(move |_| {
        if let TerminalAction::Redirect { location, status } = action.get() {
            log!("↪️ {} -> {}", status, location);
            ctx.redirect(&location);
        }
    });

    move || match action.get() {
        TerminalAction::Redirect { .. } => {
            view! { <div class="placeholder">"Redirigiendo…"</div> }.into_any()
        }
        TerminalAction::Render(target) => render_view(&target),
        TerminalAction::Error(report) => view! { <ErrorPanel report=report /> }.into_any(),
    }
}
