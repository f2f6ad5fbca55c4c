// ============================================================================
// PRODUCTS VIEW - Listado público
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::el;
use crate::viewmodels::{LoadState, ProductsViewModel};

pub fn render_products(vm: &ProductsViewModel) -> Result<Element, JsValue> {
    let container = el("section")?
        .class("products")
        .child(el("h2")?.text("Productos").build())?;

    let body = match vm.state() {
        LoadState::Loading => el("p")?.class("loading").text("Cargando productos...").build(),
        LoadState::Failed(message) => el("p")?.class("notice notice-error").text(&message).build(),
        LoadState::Ready(products) if products.is_empty() => {
            el("p")?.class("empty").text("No hay productos").build()
        }
        LoadState::Ready(products) => {
            let mut list = el("ul")?.class("product-list");
            for product in &products {
                let item = el("li")?
                    .class("product-item")
                    .child(el("strong")?.text(&product.nombre).build())?
                    .child(el("span")?.class("price").text(&format!("${:.2}", product.precio)).build())?
                    .child(el("span")?.class("stock").text(&format!("Stock: {}", product.stock)).build())?
                    .build();
                list = list.child(item)?;
            }
            list.build()
        }
    };

    Ok(container.child(body)?.build())
}
