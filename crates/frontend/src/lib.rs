pub mod app;
pub mod layout;
pub mod shared;
pub mod views;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    // Каталог навигации валидируется здесь, до первого рендера:
    // ошибка конфигурации должна уронить приложение сразу.
    let catalog = shared::nav::catalog();
    log::info!(
        "navigation catalog: {} modules, {} bound views",
        catalog.modules().len(),
        views::bound_views().len()
    );

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
