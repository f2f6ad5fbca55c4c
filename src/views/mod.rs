// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================

pub mod app;
pub mod login;
pub mod products;
pub mod product_form;
pub mod user_form;
pub mod sales;

pub use app::render_app;
pub use login::render_login;
pub use products::render_products;
pub use product_form::render_product_form;
pub use user_form::render_user_form;
pub use sales::render_sales;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::el;
use crate::viewmodels::Notice;

/// Mensaje de éxito / error debajo de un formulario
pub(crate) fn render_notice(notice: &Notice) -> Result<Element, JsValue> {
    let class = if notice.is_error() { "notice notice-error" } else { "notice notice-success" };
    Ok(el("p")?.class(class).text(notice.text()).build())
}

/// Campo con label + input
pub(crate) fn render_field(label: &str, input: Element) -> Result<Element, JsValue> {
    Ok(el("label")?
        .class("field")
        .child(el("span")?.text(label).build())?
        .child(input)?
        .build())
}
