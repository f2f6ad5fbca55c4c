// ============================================================================
// ROUTER - Rutas, guard por rol y links de navegación
// ============================================================================

use crate::models::auth::{Role, Session};

pub const VENTAS_ROLES: &[Role] = &[Role::Vendedor];
pub const CREAR_USUARIO_ROLES: &[Role] = &[Role::Comprador, Role::Precio];
pub const CREAR_PRODUCTO_ROLES: &[Role] = &[Role::Vendedor, Role::Comprador];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Productos,
    Login,
    Ventas,
    CrearUsuario,
    CrearProducto,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Productos,
        Route::Ventas,
        Route::Login,
        Route::CrearUsuario,
        Route::CrearProducto,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Productos => "/",
            Route::Login => "/login",
            Route::Ventas => "/ventas",
            Route::CrearUsuario => "/crear-usuario",
            Route::CrearProducto => "/crear-producto",
        }
    }

    /// Rutas desconocidas caen en `/`
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::Productos)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Productos => "Productos",
            Route::Login => "Login",
            Route::Ventas => "Ventas",
            Route::CrearUsuario => "Crear Usuario",
            Route::CrearProducto => "Crear Producto",
        }
    }

    /// `None` = ruta pública
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Productos | Route::Login => None,
            Route::Ventas => Some(VENTAS_ROLES),
            Route::CrearUsuario => Some(CREAR_USUARIO_ROLES),
            Route::CrearProducto => Some(CREAR_PRODUCTO_ROLES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// `replace`: la redirección no agrega entrada al historial
    Redirect { to: Route, replace: bool },
}

/// Guard por rol: renderiza si el rol de la sesión está en `allowed`,
/// si no redirige a `/` reemplazando la entrada del historial.
pub fn guard(allowed: &[Role], session: &Session) -> GuardDecision {
    if session.has_any_role(allowed) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect {
            to: Route::Productos,
            replace: true,
        }
    }
}

/// Aplica el guard de la ruta (si tiene)
pub fn authorize(route: Route, session: &Session) -> GuardDecision {
    match route.allowed_roles() {
        Some(allowed) => guard(allowed, session),
        None => GuardDecision::Render,
    }
}

/// Links visibles en el header para la sesión actual
pub fn nav_links(session: &Session) -> Vec<Route> {
    Route::ALL
        .into_iter()
        .filter(|route| authorize(*route, session) == GuardDecision::Render)
        .collect()
}
