// ============================================================================
// SALES VIEW - Registrar venta
// ============================================================================
// El input de cantidad no re-renderiza la vista: se actualizan en el lugar
// el botón "Agregar al carrito" y el aviso de stock (ver refresh_add_controls).
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    el, get_element_by_id, input_checked, listen, on_click, on_input, select_value, set_disabled,
    set_text_content,
};
use crate::viewmodels::{SalesPhase, SalesState, SalesViewModel};
use crate::views::render_notice;

const ADD_BUTTON_ID: &str = "add-to-cart";
const STOCK_WARNING_ID: &str = "stock-warning";

pub fn render_sales(vm: &SalesViewModel) -> Result<Element, JsValue> {
    let state = vm.state();

    let mut section = el("section")?
        .class("sales")
        .child(el("h2")?.text("Registrar Venta").build())?;

    if state.phase == SalesPhase::LoadingProducts {
        return Ok(section
            .child(el("p")?.class("loading").text("Cargando productos...").build())?
            .build());
    }

    section = section
        .child(render_picker(vm, &state)?)?
        .child(render_cart(vm, &state)?)?;

    if let Some(notice) = &state.notice {
        section = section.child(render_notice(notice)?)?;
    }

    Ok(section.build())
}

/// Filtro de stock + selector de producto + cantidad + botón agregar
fn render_picker(vm: &SalesViewModel, state: &SalesState) -> Result<Element, JsValue> {
    let mut only_in_stock = el("input")?.attr("type", "checkbox")?;
    if state.only_in_stock {
        only_in_stock = only_in_stock.attr("checked", "")?;
    }
    let only_in_stock = only_in_stock.build();
    {
        let vm = vm.clone();
        listen(&only_in_stock, "change", move |e| vm.set_only_in_stock(input_checked(e.target())))?;
    }

    let mut select = el("select")?.child(
        el("option")?
            .attr("value", "")?
            .text("Selecciona un producto...")
            .build(),
    )?;
    for product in state.visible_products() {
        let mut option = el("option")?
            .attr("value", &product.id.to_string())?
            .text(&product.option_label());
        if state.selected == Some(product.id) {
            option = option.attr("selected", "")?;
        }
        select = select.child(option.build())?;
    }
    let select = select.build();
    {
        let vm = vm.clone();
        listen(&select, "change", move |e| {
            vm.select_product(select_value(e.target()).parse::<i64>().ok());
        })?;
    }

    let cantidad = el("input")?
        .attr("type", "number")?
        .attr("min", "1")?
        .attr("value", &state.cantidad.to_string())?
        .build();
    {
        let vm = vm.clone();
        on_input(&cantidad, move |value| {
            // Vacío o inválido cuenta como 0 (deshabilita el botón)
            vm.set_quantity(value.trim().parse::<i64>().unwrap_or(0));
            refresh_add_controls(&vm.state());
        })?;
    }

    let add = el("button")?
        .class("btn btn-primary")
        .attr("id", ADD_BUTTON_ID)?
        .attr("type", "button")?
        .text("Agregar al carrito")
        .disabled(!state.can_add())?
        .build();
    {
        let vm = vm.clone();
        on_click(&add, move || {
            if let Err(reason) = vm.add_item() {
                log::warn!("⚠️ [VENTAS] No se pudo agregar: {:?}", reason);
            }
        })?;
    }

    let warning = el("p")?
        .class("stock-warning")
        .attr("id", STOCK_WARNING_ID)?
        .text(&state.stock_warning().unwrap_or_default())
        .build();

    Ok(el("div")?
        .class("sale-picker")
        .child(
            el("label")?
                .class("checkbox")
                .child(only_in_stock)?
                .child(el("span")?.text("Mostrar solo productos con stock").build())?
                .build(),
        )?
        .child(select)?
        .child(cantidad)?
        .child(add)?
        .child(warning)?
        .build())
}

/// Actualiza botón y aviso sin reconstruir la vista (el input conserva el foco)
fn refresh_add_controls(state: &SalesState) {
    if let Some(button) = get_element_by_id(ADD_BUTTON_ID) {
        if let Err(e) = set_disabled(&button, !state.can_add()) {
            log::error!("❌ [VENTAS] Error actualizando botón: {:?}", e);
        }
    }
    if let Some(warning) = get_element_by_id(STOCK_WARNING_ID) {
        set_text_content(&warning, &state.stock_warning().unwrap_or_default());
    }
}

/// Tabla del carrito + total + confirmar
fn render_cart(vm: &SalesViewModel, state: &SalesState) -> Result<Element, JsValue> {
    let mut cart = el("div")?
        .class("cart")
        .child(el("h3")?.text("Detalle de la venta").build())?;

    if state.cart.is_empty() {
        cart = cart.child(el("p")?.class("empty").text("El carrito está vacío").build())?;
    } else {
        let head = el("tr")?
            .child(el("th")?.text("Producto").build())?
            .child(el("th")?.text("Cantidad").build())?
            .child(el("th")?.text("Precio").build())?
            .child(el("th")?.text("Subtotal").build())?
            .child(el("th")?.build())?
            .build();
        let mut table = el("table")?.class("cart-table").child(el("thead")?.child(head)?.build())?;
        let mut body = el("tbody")?;
        for line in &state.cart {
            let remove = el("button")?
                .class("btn btn-remove")
                .attr("type", "button")?
                .attr("title", "Eliminar")?
                .text("✕")
                .disabled(state.phase == SalesPhase::Confirming)?
                .build();
            {
                let vm = vm.clone();
                let product_id = line.product.id;
                on_click(&remove, move || {
                    vm.remove_item(product_id);
                })?;
            }
            let row = el("tr")?
                .child(el("td")?.text(&line.product.nombre).build())?
                .child(el("td")?.text(&line.cantidad.to_string()).build())?
                .child(el("td")?.text(&format!("${:.2}", line.product.precio)).build())?
                .child(el("td")?.text(&format!("${:.2}", line.subtotal())).build())?
                .child(el("td")?.child(remove)?.build())?
                .build();
            body = body.child(row)?;
        }
        table = table.child(body.build())?;
        cart = cart.child(table.build())?;
    }

    let total = el("p")?
        .class("cart-total")
        .text(&format!("Total: ${:.2}", state.total()))
        .build();

    let confirming = state.phase == SalesPhase::Confirming;
    let confirm = el("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .text(if confirming { "Confirmando..." } else { "Confirmar venta" })
        .disabled(!state.can_confirm())?
        .build();
    {
        let vm = vm.clone();
        on_click(&confirm, move || {
            let vm = vm.clone();
            spawn_local(async move {
                vm.confirm().await;
            });
        })?;
    }

    Ok(cart.child(total)?.child(confirm)?.build())
}
