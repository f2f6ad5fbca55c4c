// ============================================================================
// VIEWMODELS - Estado + lógica de cada vista (sin DOM)
// ============================================================================

pub mod login_viewmodel;
pub mod products_viewmodel;
pub mod product_form_viewmodel;
pub mod user_form_viewmodel;
pub mod sales_viewmodel;

pub use login_viewmodel::{LoginForm, LoginViewModel};
pub use products_viewmodel::ProductsViewModel;
pub use product_form_viewmodel::{ProductForm, ProductFormViewModel};
pub use user_form_viewmodel::{UserForm, UserFormViewModel};
pub use sales_viewmodel::{AddRejection, SalesPhase, SalesState, SalesViewModel};

/// Mensaje mostrado debajo de un formulario
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Estado de una carga remota
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// Mensaje de validación de los formularios de alta
pub const REQUIRED_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";

/// Mensaje de las vistas cuando el rol no alcanza
pub const NO_PERMISSION_MESSAGE: &str = "No tenés permisos para acceder a esta sección";
