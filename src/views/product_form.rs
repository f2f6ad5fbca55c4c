// ============================================================================
// PRODUCT FORM VIEW - Crear producto
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{el, on_input, on_submit};
use crate::viewmodels::{ProductFormViewModel, NO_PERMISSION_MESSAGE};
use crate::views::{render_field, render_notice};

pub fn render_product_form(vm: &ProductFormViewModel) -> Result<Element, JsValue> {
    if !vm.has_permission() {
        return Ok(el("p")?.class("notice notice-error").text(NO_PERMISSION_MESSAGE).build());
    }
    let form = vm.form();

    let nombre = el("input")?
        .attr("type", "text")?
        .attr("placeholder", "Ej: Camisa")?
        .attr("value", &form.nombre)?
        .build();
    {
        let vm = vm.clone();
        on_input(&nombre, move |value| vm.set_nombre(&value))?;
    }

    let precio = el("input")?
        .attr("type", "number")?
        .attr("min", "0")?
        .attr("step", "0.01")?
        .attr("placeholder", "Ej: 2500")?
        .attr("value", &form.precio)?
        .build();
    {
        let vm = vm.clone();
        on_input(&precio, move |value| vm.set_precio(&value))?;
    }

    let stock = el("input")?
        .attr("type", "number")?
        .attr("min", "0")?
        .attr("placeholder", "Ej: 10")?
        .attr("value", &form.stock)?
        .build();
    {
        let vm = vm.clone();
        on_input(&stock, move |value| vm.set_stock(&value))?;
    }

    let submit = el("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Crear producto")
        .disabled(form.loading)?
        .build();

    let notice = match &form.notice {
        Some(notice) => Some(render_notice(notice)?),
        None => None,
    };

    let form_el = el("form")?
        .class("form product-form")
        .child(el("h2")?.text("Crear Producto").build())?
        .child(render_field("Nombre", nombre)?)?
        .child(render_field("Precio", precio)?)?
        .child(render_field("Stock", stock)?)?
        .child(submit)?
        .children(notice)?
        .build();

    let vm = vm.clone();
    on_submit(&form_el, move || {
        let vm = vm.clone();
        spawn_local(async move { vm.submit().await });
    })?;

    Ok(form_el)
}
