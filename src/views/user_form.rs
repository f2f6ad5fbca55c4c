// ============================================================================
// USER FORM VIEW - Crear usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{el, listen, on_input, on_submit, select_value};
use crate::viewmodels::user_form_viewmodel::ASSIGNABLE_ROLES;
use crate::viewmodels::{UserFormViewModel, NO_PERMISSION_MESSAGE};
use crate::views::{render_field, render_notice};

pub fn render_user_form(vm: &UserFormViewModel) -> Result<Element, JsValue> {
    if !vm.has_permission() {
        return Ok(el("p")?.class("notice notice-error").text(NO_PERMISSION_MESSAGE).build());
    }
    let form = vm.form();

    let nombre = el("input")?
        .attr("type", "text")?
        .attr("placeholder", "Ej: lucas")?
        .attr("value", &form.nombre)?
        .build();
    {
        let vm = vm.clone();
        on_input(&nombre, move |value| vm.set_nombre(&value))?;
    }

    let clave = el("input")?
        .attr("type", "password")?
        .attr("placeholder", "Ej: clave123")?
        .attr("value", &form.clave)?
        .build();
    {
        let vm = vm.clone();
        on_input(&clave, move |value| vm.set_clave(&value))?;
    }

    let mut rol = el("select")?;
    for role in ASSIGNABLE_ROLES {
        let mut option = el("option")?.attr("value", role.as_str())?.text(role.label());
        if role == form.rol {
            option = option.attr("selected", "")?;
        }
        rol = rol.child(option.build())?;
    }
    let rol = rol.build();
    {
        let vm = vm.clone();
        listen(&rol, "change", move |e| vm.set_rol(&select_value(e.target())))?;
    }

    let submit = el("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Crear usuario")
        .disabled(form.loading)?
        .build();

    let notice = match &form.notice {
        Some(notice) => Some(render_notice(notice)?),
        None => None,
    };

    let form_el = el("form")?
        .class("form user-form")
        .child(el("h2")?.text("Crear Usuario").build())?
        .child(render_field("Nombre", nombre)?)?
        .child(render_field("Clave", clave)?)?
        .child(render_field("Rol", rol)?)?
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
