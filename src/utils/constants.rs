/// Claves en localStorage
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "rol";

/// Título de la app
pub const APP_TITLE: &str = "🛍️ Ventas App";
