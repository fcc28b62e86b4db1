use contracts::shared::navigation::{select_dashboard_variant, DashboardVariant, PersonaContext};
use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;

fn widgets(variant: DashboardVariant) -> &'static [&'static str] {
    match variant {
        DashboardVariant::Executive => &["Ingresos del mes", "Margen bruto", "Aprobaciones pendientes"],
        DashboardVariant::Operations => &["Órdenes abiertas", "Recepciones de hoy", "Rutas activas"],
        DashboardVariant::Finance => &["Facturas por cobrar", "Pagos programados", "Saldo de caja"],
        DashboardVariant::Sales => &["Oportunidades abiertas", "Pedidos del día", "Clientes nuevos"],
    }
}

/// Главный дашборд, вариант зависит от роли персоны
#[component]
pub fn HomeDashboard(persona: PersonaContext) -> impl IntoView {
    let variant = select_dashboard_variant(&persona);
    let page_id = "inicio--dashboard".to_string();

    view! {
        <PageFrame page_id=page_id class="page--dashboard">
            <div class="page__header">
                <h2>{format!("Hola, {}", persona.user_id)}</h2>
                <span class="page__subtitle">{persona.role.label()}</span>
            </div>
            <div class="page__content home-widgets">
                {widgets(variant)
                    .iter()
                    .map(|title| view! {
                        <div class="home-widget">
                            <div class="home-widget__title">{*title}</div>
                            <div class="home-widget__value">"-"</div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </PageFrame>
    }
}
