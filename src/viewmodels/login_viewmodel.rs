// ============================================================================
// LOGIN VIEWMODEL
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::router::Route;
use crate::services::ClientFactory;
use crate::state::ReactiveState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub nombre: String,
    pub clave: String,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct LoginViewModel {
    factory: Rc<ClientFactory>,
    form: ReactiveState<LoginForm>,
}

impl LoginViewModel {
    pub fn new(factory: Rc<ClientFactory>) -> Self {
        Self {
            factory,
            form: ReactiveState::new(LoginForm::default()),
        }
    }

    pub fn form(&self) -> LoginForm {
        self.form.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.form.subscribe(callback);
    }

    pub fn set_nombre(&self, nombre: &str) {
        self.form.update_silent(|f| f.nombre = nombre.to_string());
    }

    pub fn set_clave(&self, clave: &str) {
        self.form.update_silent(|f| f.clave = clave.to_string());
    }

    /// Login. Devuelve la ruta a la que navegar si tuvo éxito.
    ///
    /// La sesión solo se escribe cuando el backend acepta las credenciales.
    pub async fn submit(&self) -> Option<Route> {
        let LoginForm { nombre, clave, loading, .. } = self.form.get();
        if loading {
            return None;
        }
        if nombre.trim().is_empty() || clave.is_empty() {
            self.form.update(|f| f.error = Some("Ingresá usuario y contraseña".to_string()));
            return None;
        }

        self.form.update(|f| {
            f.loading = true;
            f.error = None;
        });

        let client = self.factory.get_client().await;
        let result = match client.login(nombre.trim(), &clave).await {
            Ok(resp) => self.factory.session().set(&resp.token, &resp.rol),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                log::info!("✅ [LOGIN] Login exitoso para {}", nombre);
                self.form.set(LoginForm::default());
                Some(Route::Productos)
            }
            Err(err) => {
                log::warn!("❌ [LOGIN] Login fallido: {}", err);
                let message = match err {
                    AppError::Storage(text) => text,
                    _ => "Credenciales inválidas".to_string(),
                };
                self.form.update(|f| {
                    f.loading = false;
                    f.error = Some(message);
                });
                None
            }
        }
    }
}
