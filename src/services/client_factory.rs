// ============================================================================
// CLIENT FACTORY - ApiClient único, inicializado una sola vez
// ============================================================================
// La primera llamada a `get_client` arranca la inicialización (fetch de
// /config.json + resolución de URL). Las llamadas concurrentes esperan el
// mismo future compartido, así que hay un solo fetch y una sola instancia.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::config::{AppConfig, RuntimeConfig};
use crate::services::api_client::ApiClient;
use crate::services::http::{HttpRequest, HttpTransport};
use crate::state::session_state::SessionStore;

pub type ClientFuture = Shared<LocalBoxFuture<'static, Rc<ApiClient>>>;

pub struct ClientFactory {
    config: AppConfig,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
    client: RefCell<Option<ClientFuture>>,
}

impl ClientFactory {
    pub fn new(config: AppConfig, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            config,
            transport,
            session,
            client: RefCell::new(None),
        }
    }

    /// Cliente compartido. Nunca falla: si /config.json no está se usa la
    /// siguiente fuente de URL.
    pub fn get_client(&self) -> ClientFuture {
        if let Some(pending) = self.client.borrow().as_ref() {
            return pending.clone();
        }

        let future = initialize(self.config.clone(), self.transport.clone(), self.session.clone())
            .boxed_local()
            .shared();
        *self.client.borrow_mut() = Some(future.clone());
        future
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

async fn initialize(config: AppConfig, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Rc<ApiClient> {
    let runtime = fetch_runtime_config(transport.as_ref(), &config.runtime_config_path).await;
    let base_url = config.resolve_base_url(runtime.as_ref());
    log::info!("🌐 [API] URL usada: '{}'", base_url);
    Rc::new(ApiClient::new(base_url, transport, session))
}

/// Fallo no fatal: se registra y se devuelve `None`
async fn fetch_runtime_config(transport: &dyn HttpTransport, path: &str) -> Option<RuntimeConfig> {
    match transport.send(HttpRequest::get(path)).await {
        Ok(response) if response.ok() => match response.json::<RuntimeConfig>() {
            Ok(runtime) => Some(runtime),
            Err(e) => {
                log::warn!("⚠️ [CONFIG] {} inválido: {}", path, e);
                None
            }
        },
        Ok(response) => {
            log::warn!("⚠️ [CONFIG] {} no disponible (HTTP {})", path, response.status);
            None
        }
        Err(e) => {
            log::warn!("⚠️ [CONFIG] No se pudo obtener {}: {}", path, e);
            None
        }
    }
}
