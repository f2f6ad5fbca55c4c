// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP con el backend de ventas
// ============================================================================
// Cada request pasa por `authorize` (interceptor): si hay token en la
// sesión se agrega `Authorization: Bearer <token>`.
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, NewProduct, NewUser, Product, SaleRequest, SaleResponse};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::state::session_state::SessionStore;

pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            session,
        }
    }

    /// URL base resuelta ("" = mismo origen)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Interceptor: el token se lee en el momento del envío
    fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let request = self.authorize(request);
        log::debug!("🌐 [API] {:?} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        if !response.ok() {
            log::warn!("⚠️ [API] HTTP {}: {}", response.status, response.error_message());
            return Err(response.into_error());
        }
        Ok(response)
    }

    /// `POST /login`
    pub async fn login(&self, nombre: &str, clave: &str) -> Result<LoginResponse, AppError> {
        let request = HttpRequest::post_json(
            self.url("/login"),
            &LoginRequest {
                nombre: nombre.to_string(),
                clave: clave.to_string(),
            },
        )?;

        log::info!("🔐 [API] Login de usuario: {}", nombre);

        match self.send(request).await {
            Ok(response) => response.json::<LoginResponse>(),
            Err(err) if err.is_client_error() => Err(AppError::InvalidCredentials),
            Err(err) => Err(err),
        }
    }

    /// `GET /productos`
    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let response = self.send(HttpRequest::get(self.url("/productos"))).await?;
        let products = response.json::<Vec<Product>>()?;
        log::info!("📦 [API] {} productos recibidos", products.len());
        Ok(products)
    }

    /// `POST /productos`. Devuelve el registro creado si el backend lo envía
    /// en un formato reconocible.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Option<Product>, AppError> {
        let request = HttpRequest::post_json(self.url("/productos"), product)?;
        let response = self.send(request).await?;
        log::info!("✅ [API] Producto creado: {}", product.nombre);
        Ok(response.json::<Product>().ok())
    }

    /// `POST /usuarios`
    pub async fn create_user(&self, user: &NewUser) -> Result<(), AppError> {
        let request = HttpRequest::post_json(self.url("/usuarios"), user)?;
        self.send(request).await?;
        log::info!("✅ [API] Usuario creado: {} ({})", user.nombre, user.rol);
        Ok(())
    }

    /// `POST /ventas` - se envía una sola vez, sin reintentos
    pub async fn register_sale(&self, sale: &SaleRequest) -> Result<SaleResponse, AppError> {
        let request = HttpRequest::post_json(self.url("/ventas"), sale)?;
        let response = self.send(request).await?;
        log::info!("🧾 [API] Venta registrada ({} líneas)", sale.items.len());

        if response.body.trim().is_empty() {
            return Ok(SaleResponse::default());
        }
        Ok(response.json::<SaleResponse>().unwrap_or_default())
    }
}
