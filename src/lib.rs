// ============================================================================
// VENTAS APP - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: estado + lógica UI
// - Services: SOLO comunicación API
// - State: state management con Rc<RefCell>
// - Models: estructuras compartidas con el backend
//
// Todo lo que no toca el DOM compila también fuera de wasm32 y se testea
// con `cargo test`.
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::app::{current_path, App, HistoryMode};
    use crate::config::CONFIG;
    use crate::dom::{listen, window};
    use crate::router::Route;
    use crate::services::GlooTransport;
    use crate::state::AppState;
    use crate::utils::storage::LocalStorage;

    // Instancia global de la App
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        log::info!("🚀 Ventas App - Rust Puro + MVVM");

        let state = AppState::new(CONFIG.clone(), Rc::new(LocalStorage), Rc::new(GlooTransport));
        let app = App::new(state)?;
        app.navigate_to(Route::from_path(&current_path()), HistoryMode::Keep)?;
        app.render()?;

        APP.with(|cell| *cell.borrow_mut() = Some(app));

        // Back / forward. Se registra UNA sola vez.
        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        listen(&win, "popstate", |_| {
            with_app(|app| app.navigate_to(Route::from_path(&current_path()), HistoryMode::Keep).map(|_| ()));
        })?;

        Ok(())
    }

    fn with_app<F>(f: F)
    where
        F: FnOnce(&App) -> Result<(), JsValue>,
    {
        APP.with(|cell| match cell.try_borrow() {
            Ok(app) => match app.as_ref() {
                Some(app) => {
                    if let Err(e) = f(app) {
                        log::error!("❌ [APP] {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [APP] App no está inicializada"),
            },
            Err(_) => log::warn!("⚠️ [APP] App ocupada, acción descartada"),
        });
    }

    /// Re-render completo
    pub fn rerender_app() {
        with_app(App::render);
    }

    /// Navegación desde links y vistas (agrega entrada al historial)
    pub fn navigate_to(route: Route) {
        with_app(|app| app.navigate_to(route, HistoryMode::Push).map(|_| ()));
    }

    pub fn logout() {
        with_app(App::logout);
    }
}
