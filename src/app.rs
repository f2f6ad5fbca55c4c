// ============================================================================
// APP - Aplicación principal: raíz #app, historial y montaje de vistas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id, window};
use crate::router::Route;
use crate::state::app_state::{AppState, Navigation, Page};
use crate::views::render_app;

/// Qué hacer con la URL al navegar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Click en un link: nueva entrada
    Push,
    /// La URL ya es la del navegador (carga inicial, back/forward)
    Keep,
}

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new(state: AppState) -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;

        // Suscribirse a cambios de ruta y sesión para re-renderizar
        state.subscribe_to_changes(schedule_rerender);

        Ok(Self { state, root })
    }

    /// Re-render completo
    pub fn render(&self) -> Result<(), JsValue> {
        clear_children(&self.root);
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)
    }

    /// Navega pasando por el guard, actualiza la URL y dispara la carga inicial de la vista
    pub fn navigate_to(&self, requested: Route, mode: HistoryMode) -> Result<Navigation, JsValue> {
        let navigation = self.state.navigate(requested, false);
        log::info!("🧭 [ROUTER] {} -> {}", requested.path(), navigation.route.path());

        if navigation.replace {
            update_history(navigation.route, true)?;
        } else if mode == HistoryMode::Push {
            update_history(navigation.route, false)?;
        }

        self.mount_page();
        Ok(navigation)
    }

    /// Logout desde el header
    pub fn logout(&self) -> Result<(), JsValue> {
        let navigation = self
            .state
            .logout()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("👋 [APP] Sesión cerrada");
        if navigation.replace {
            update_history(navigation.route, true)?;
            self.mount_page();
        }
        Ok(())
    }

    /// Suscribe la vista nueva al re-render y lanza su carga de datos
    fn mount_page(&self) {
        let Some(page) = self.state.page() else {
            return;
        };
        match page {
            Page::Productos(vm) => {
                vm.subscribe(schedule_rerender);
                spawn_local(async move { vm.load().await });
            }
            Page::Ventas(vm) => {
                vm.subscribe(schedule_rerender);
                spawn_local(async move { vm.load_products().await });
            }
            Page::Login(vm) => vm.subscribe(schedule_rerender),
            Page::CrearUsuario(vm) => vm.subscribe(schedule_rerender),
            Page::CrearProducto(vm) => vm.subscribe(schedule_rerender),
        }
    }
}

/// pushState / replaceState sin recargar
fn update_history(route: Route, replace: bool) -> Result<(), JsValue> {
    let history = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
    }
}

/// Path actual del navegador
pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Usar gloo_timers para batchear múltiples updates en un solo render
pub fn schedule_rerender() {
    gloo_timers::callback::Timeout::new(0, crate::rerender_app).forget();
}
