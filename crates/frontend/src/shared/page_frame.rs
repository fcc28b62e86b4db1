//! PageFrame: root wrapper for every view rendered by the page shell.
//!
//! `id` на корневом элементе: `"{module}--{identifier}"`, например
//! `"compras--ordenes"`. Удобно искать страницу в DOM-инспекторе.

use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{module}--{identifier}`.
    page_id: String,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let full_class = if class.is_empty() {
        "page".to_string()
    } else {
        format!("page {class}")
    };

    view! {
        <div id=page_id class=full_class>
            {children()}
        </div>
    }
}
