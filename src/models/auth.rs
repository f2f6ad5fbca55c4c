use serde::{Deserialize, Serialize};
use std::fmt;

/// Rol de la sesión. Se compara exacto y distinguiendo mayúsculas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Vendedor,
    Comprador,
    Precio,
    Administrador,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Vendedor,
        Role::Comprador,
        Role::Precio,
        Role::Administrador,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Vendedor => "vendedor",
            Role::Comprador => "comprador",
            Role::Precio => "precio",
            Role::Administrador => "administrador",
        }
    }

    /// `None` para "", roles desconocidos o mayúsculas distintas
    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == value)
    }

    /// Etiqueta para selects y navegación
    pub fn label(&self) -> &'static str {
        match self {
            Role::Vendedor => "Vendedor",
            Role::Comprador => "Comprador",
            Role::Precio => "Precio",
            Role::Administrador => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sesión autenticada tal como está en localStorage.
///
/// `role` guarda el texto crudo de `rol`; usar [`Session::role`] para
/// obtener el rol tipado.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: String,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role().map_or(false, |role| allowed.contains(&role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub nombre: String,
    pub clave: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub rol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!(Role::parse("vendedor"), Some(Role::Vendedor));
        assert_eq!(Role::parse("administrador"), Some(Role::Administrador));
        assert_eq!(Role::parse("Administrador"), None);
        assert_eq!(Role::parse(" vendedor"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn empty_session_has_no_role() {
        let session = Session::default();
        assert!(!session.has_any_role(&Role::ALL));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn login_response_without_role_reads_empty() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.rol, "");
    }
}
