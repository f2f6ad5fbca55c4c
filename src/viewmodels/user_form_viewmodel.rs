// ============================================================================
// USER FORM VIEWMODEL - Alta de usuarios
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::models::{NewUser, Role};
use crate::router::CREAR_USUARIO_ROLES;
use crate::services::ClientFactory;
use crate::state::ReactiveState;
use crate::viewmodels::{Notice, REQUIRED_FIELDS_MESSAGE};

/// Roles que se pueden asignar desde el formulario, el primero es el default
pub const ASSIGNABLE_ROLES: [Role; 3] = [Role::Comprador, Role::Vendedor, Role::Precio];

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub nombre: String,
    pub clave: String,
    pub rol: Role,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            clave: String::new(),
            rol: ASSIGNABLE_ROLES[0],
            loading: false,
            notice: None,
        }
    }
}

impl UserForm {
    pub fn validate(&self) -> Result<NewUser, AppError> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() || self.clave.is_empty() {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        Ok(NewUser {
            nombre: nombre.to_string(),
            clave: self.clave.clone(),
            rol: self.rol.as_str().to_string(),
        })
    }
}

#[derive(Clone)]
pub struct UserFormViewModel {
    factory: Rc<ClientFactory>,
    form: ReactiveState<UserForm>,
}

impl UserFormViewModel {
    pub fn new(factory: Rc<ClientFactory>) -> Self {
        Self {
            factory,
            form: ReactiveState::new(UserForm::default()),
        }
    }

    pub fn form(&self) -> UserForm {
        self.form.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.form.subscribe(callback);
    }

    pub fn has_permission(&self) -> bool {
        self.factory.session().get().has_any_role(CREAR_USUARIO_ROLES)
    }

    pub fn set_nombre(&self, value: &str) {
        self.form.update_silent(|f| f.nombre = value.to_string());
    }

    pub fn set_clave(&self, value: &str) {
        self.form.update_silent(|f| f.clave = value.to_string());
    }

    /// Valores fuera de la lista se ignoran
    pub fn set_rol(&self, value: &str) {
        if let Some(rol) = Role::parse(value).filter(|r| ASSIGNABLE_ROLES.contains(r)) {
            self.form.update(|f| f.rol = rol);
        }
    }

    pub async fn submit(&self) {
        let form = self.form.get();
        if form.loading {
            return;
        }
        let user = match form.validate() {
            Ok(user) => user,
            Err(err) => {
                self.form.update(|f| f.notice = Some(Notice::Error(err.user_message())));
                return;
            }
        };

        self.form.update(|f| {
            f.loading = true;
            f.notice = None;
        });

        let client = self.factory.get_client().await;
        match client.create_user(&user).await {
            Ok(()) => {
                self.form.set(UserForm {
                    notice: Some(Notice::Success("Usuario creado con éxito".to_string())),
                    ..UserForm::default()
                });
            }
            Err(err) => {
                log::error!("❌ [CREAR USUARIO] {}", err);
                self.form.update(|f| {
                    f.loading = false;
                    f.notice = Some(Notice::Error(format!(
                        "Error al crear usuario: {}",
                        err.user_message()
                    )));
                });
            }
        }
    }
}
