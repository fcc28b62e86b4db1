use contracts::shared::navigation::RenderTarget;
use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;

/// Заглушка экрана: показывает, что именно выбрал резолвер.
#[component]
pub fn ViewPlaceholder(title: &'static str, target: RenderTarget) -> impl IntoView {
    let page_id = format!("{}--{}", target.module, target.identifier);
    let query = target
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    view! {
        <PageFrame page_id=page_id>
            <div class="page__header">
                <h2>{title}</h2>
                <span class="page__badge">{target.version.as_str()}</span>
            </div>
            <div class="page__content">
                <dl class="page__meta">
                    <dt>"view"</dt>
                    <dd>{target.view.as_str().to_string()}</dd>
                    {(!query.is_empty()).then(|| view! {
                        <dt>"query"</dt>
                        <dd>{query}</dd>
                    })}
                    {(!target.tail.is_empty()).then(|| view! {
                        <dt>"tail"</dt>
                        <dd>{target.tail.join("/")}</dd>
                    })}
                </dl>
            </div>
        </PageFrame>
    }
}
