use contracts::shared::navigation::ErrorReport;
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;

/// Панель ошибки навигации. Переход на fallback только по клику.
#[component]
pub fn ErrorPanel(report: ErrorReport) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let fallback = report.fallback_action.location.clone();

    view! {
        <div class="page page--error" data-error-code=report.code.as_str()>
            <MessageBar intent=MessageBarIntent::Error>
                <MessageBarBody>
                    <MessageBarTitle>{report.title.clone()}</MessageBarTitle>
                    {report.message.clone()}
                </MessageBarBody>
            </MessageBar>
            <div style="margin-top: var(--spacing-md);">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=move |_| ctx.navigate(&fallback)
                >
                    {report.fallback_action.label.clone()}
                </Button>
            </div>
        </div>
    }
}
