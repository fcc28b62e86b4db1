use super::subnav::SubNav;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-center" style="flex: 1; overflow: auto;">
            <SubNav />
            {children()}
        </div>
    }
}
