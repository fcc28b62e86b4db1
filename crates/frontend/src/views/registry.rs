//! View registry - единственный источник правды для маппинга ViewKey → View
//!
//! Ключ вью приходит из каталога навигации (`compras.ordenes`, ...). Всё, что
//! перечислено в `VIEW_TITLES`, считается привязанным: резолвер отдаёт
//! MISSING_VIEW_BINDING для остальных ключей каталога.

use std::collections::BTreeSet;

use contracts::shared::navigation::{RenderTarget, ViewKey};
use leptos::logging::log;
use leptos::prelude::*;
use once_cell::sync::Lazy;

use super::home::HomeDashboard;
use super::placeholder::ViewPlaceholder;

/// (view key, page title)
const VIEW_TITLES: &[(&str, &str)] = &[
    // inicio
    ("inicio.resumen", "Resumen"),
    ("inicio.actividad", "Actividad reciente"),
    // crm
    ("crm.clientes", "Clientes"),
    ("crm.oportunidades", "Oportunidades"),
    ("crm.pedidos", "Pedidos"),
    ("crm.contactos", "Contactos"),
    // compras
    ("compras.resumen", "Compras: resumen"),
    ("compras.ordenes", "Órdenes de compra"),
    ("compras.ordenes_v2", "Órdenes de compra"),
    ("compras.proveedores", "Proveedores"),
    ("compras.action_center", "Centro de acciones"),
    ("compras.analitica", "Analítica de compras"),
    // compras.recepciones: экран приёмки ещё не перенесён
    // finanzas
    ("finanzas.panel", "Panel financiero"),
    ("finanzas.panel_v2", "Panel financiero"),
    ("finanzas.facturas", "Facturas"),
    ("finanzas.pagos", "Pagos"),
    ("finanzas.conciliacion", "Conciliación bancaria"),
    ("finanzas.tesoreria", "Tesorería"),
    // rutas
    ("rutas.monitor", "Monitor de rutas"),
    ("rutas.planificacion", "Planificación"),
    ("rutas.flota", "Flota"),
];

static BOUND_VIEWS: Lazy<BTreeSet<ViewKey>> =
    Lazy::new(|| VIEW_TITLES.iter().map(|(key, _)| ViewKey::from(*key)).collect());

pub fn bound_views() -> &'static BTreeSet<ViewKey> {
    &BOUND_VIEWS
}

pub fn view_title(key: &str) -> Option<&'static str> {
    VIEW_TITLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)
}

/// Рендерит вью по результату резолвинга.
pub fn render_view(target: &RenderTarget) -> AnyView {
    match target.view.as_str() {
        "inicio.resumen" => {
            let persona = target.persona.clone();
            view! { <HomeDashboard persona=persona /> }.into_any()
        }
        key => match view_title(key) {
            Some(title) => {
                let target = target.clone();
                view! { <ViewPlaceholder title=title target=target /> }.into_any()
            }
            None => {
                log!("⚠️ Unbound view: {}", key);
                view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
            }
        },
    }
}
