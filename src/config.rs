use serde::{Deserialize, Serialize};

/// URL del backend cuando no hay config en runtime ni en compilación
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Documento de configuración servido junto a la app
pub const RUNTIME_CONFIG_PATH: &str = "/config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Valor inyectado en compilación (API_URL), `None` si vino vacío
    pub build_api_url: Option<String>,
    pub default_api_url: String,
    pub runtime_config_path: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            build_api_url: None,
            default_api_url: DEFAULT_API_URL.to_string(),
            runtime_config_path: RUNTIME_CONFIG_PATH.to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Forma de `/config.json`.
///
/// `api_url: ""` es válido y significa "mismo origen" (URLs relativas).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub api_url: Option<String>,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            build_api_url: non_blank(option_env!("API_URL")),
            log_level: option_env!("LOG_LEVEL").unwrap_or("info").to_string(),
            ..Self::default()
        }
    }

    /// Resuelve la URL base: runtime > compilación > por defecto
    pub fn resolve_base_url(&self, runtime: Option<&RuntimeConfig>) -> String {
        if let Some(url) = runtime.and_then(|cfg| cfg.api_url.as_deref()) {
            return trim_trailing_slash(url);
        }
        if let Some(url) = self.build_api_url.as_deref() {
            return trim_trailing_slash(url);
        }
        trim_trailing_slash(&self.default_api_url)
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
