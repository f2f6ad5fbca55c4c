// ============================================================================
// APP VIEW - Header (título + navegación) y vista montada
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{el, on_click};
use crate::router::nav_links;
use crate::state::app_state::{AppState, Page};
use crate::utils::constants::APP_TITLE;
use crate::views::{render_login, render_product_form, render_products, render_sales, render_user_form};

/// Renderizar la aplicación completa
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let session = state.session.get();
    let current = state.current_route();

    let mut nav = el("nav")?.class("nav");
    for route in nav_links(&session) {
        let class = if route == current { "nav-link active" } else { "nav-link" };
        let link = el("a")?
            .class(class)
            .attr("href", route.path())?
            .text(route.label())
            .build();
        on_click(&link, move || crate::navigate_to(route))?;
        nav = nav.child(link)?;
    }

    if session.is_authenticated() {
        let logout = el("button")?.class("btn btn-logout").text("Logout").build();
        on_click(&logout, crate::logout)?;
        nav = nav.child(logout)?;
    }

    let header = el("header")?
        .class("app-header")
        .child(el("h1")?.text(APP_TITLE).build())?
        .child(nav.build())?
        .build();

    let content = match state.page() {
        Some(page) => render_page(&page)?,
        None => el("div")?.build(),
    };

    Ok(el("div")?
        .class("app")
        .child(header)?
        .child(el("main")?.class("app-content").child(content)?.build())?
        .build())
}

fn render_page(page: &Page) -> Result<Element, JsValue> {
    match page {
        Page::Productos(vm) => render_products(vm),
        Page::Login(vm) => render_login(vm),
        Page::Ventas(vm) => render_sales(vm),
        Page::CrearUsuario(vm) => render_user_form(vm),
        Page::CrearProducto(vm) => render_product_form(vm),
    }
}
