// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{el, on_input, on_submit};
use crate::viewmodels::LoginViewModel;
use crate::views::render_field;

/// Renderizar vista de login
pub fn render_login(vm: &LoginViewModel) -> Result<Element, JsValue> {
    let form = vm.form();

    let nombre = el("input")?
        .attr("type", "text")?
        .attr("placeholder", "Email")?
        .attr("value", &form.nombre)?
        .build();
    {
        let vm = vm.clone();
        on_input(&nombre, move |value| vm.set_nombre(&value))?;
    }

    let clave = el("input")?
        .attr("type", "password")?
        .attr("placeholder", "Password")?
        .attr("value", &form.clave)?
        .build();
    {
        let vm = vm.clone();
        on_input(&clave, move |value| vm.set_clave(&value))?;
    }

    let submit = el("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text(if form.loading { "Ingresando..." } else { "Ingresar" })
        .disabled(form.loading)?
        .build();

    let error = match &form.error {
        Some(text) => Some(el("p")?.class("notice notice-error").text(text).build()),
        None => None,
    };

    let form_el = el("form")?
        .class("form login-form")
        .child(el("h2")?.text("Login").build())?
        .child(render_field("Usuario", nombre)?)?
        .child(render_field("Contraseña", clave)?)?
        .child(submit)?
        .children(error)?
        .build();

    let vm = vm.clone();
    on_submit(&form_el, move || {
        let vm = vm.clone();
        spawn_local(async move {
            if let Some(route) = vm.submit().await {
                crate::navigate_to(route);
            }
        });
    })?;

    Ok(form_el)
}
