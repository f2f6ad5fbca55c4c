// ============================================================================
// ERRORES - Tipo de error compartido por servicios y viewmodels
// ============================================================================

use thiserror::Error;

/// Error de la aplicación.
///
/// Los servicios devuelven `Result<T, AppError>`; los viewmodels lo
/// convierten en el texto que muestra cada vista.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Campos faltantes o inválidos, detectado antes de llamar al backend
    #[error("{0}")]
    Validation(String),

    /// Login rechazado por el backend
    #[error("Credenciales inválidas")]
    InvalidCredentials,

    /// Fallo de red (no hubo respuesta HTTP)
    #[error("Error de red: {0}")]
    Network(String),

    /// Respuesta HTTP no exitosa
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Respuesta o request que no se pudo (de)serializar
    #[error("Error de formato: {0}")]
    Parse(String),

    /// localStorage no disponible o falló la escritura
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

impl AppError {
    /// Texto para mostrar al usuario: el mensaje del servidor cuando lo hay,
    /// si no el genérico de cada variante.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Server { status, .. } => format!("Error del servidor ({})", status),
            AppError::Validation(message) => message.clone(),
            AppError::InvalidCredentials => "Credenciales inválidas".to_string(),
            AppError::Network(_) => "No se pudo conectar con el servidor".to_string(),
            AppError::Parse(_) => "Respuesta inesperada del servidor".to_string(),
            AppError::Storage(message) => message.clone(),
        }
    }

    /// `true` para errores 4xx
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Server { status, .. } if (400..500).contains(status))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = AppError::Server {
            status: 400,
            message: "Stock insuficiente para Laptop".to_string(),
        };
        assert_eq!(err.user_message(), "Stock insuficiente para Laptop");
        assert!(err.is_client_error());
    }

    #[test]
    fn blank_server_message_falls_back_to_status() {
        let err = AppError::Server {
            status: 502,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), "Error del servidor (502)");
        assert!(!err.is_client_error());
    }

    #[test]
    fn network_errors_get_generic_text() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), "No se pudo conectar con el servidor");
    }
}
