// ============================================================================
// EVENT HANDLING
// ============================================================================
// closure.forget() es seguro para listeners de elementos: al destruir el
// elemento (re-render con inner_html = "") el navegador los libera.
// Los listeners globales (window) se registran UNA sola vez en el arranque.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// Listener genérico
pub fn listen<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn on_click<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(target, "click", move |e| {
        e.prevent_default();
        handler();
    })
}

/// `input` con el valor actual del campo
pub fn on_input<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(target, "input", move |e| handler(crate::dom::input_value(e.target())))
}

/// `submit` sin recargar la página
pub fn on_submit<F>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(target, "submit", move |e| {
        e.prevent_default();
        handler();
    })
}
