// Fixtures compartidos por los tests: transporte HTTP simulado + sesión en memoria

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::client_factory::ClientFactory;
use crate::services::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::state::session_state::SessionStore;
use crate::utils::storage::MemoryStorage;

pub const TEST_API_URL: &str = "http://api.test";

pub use futures::executor::block_on;

/// Cede el control una vez antes de completar, como un fetch real
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

type Reply = Result<HttpResponse, AppError>;

/// Transporte con respuestas programadas por método + path.
/// La última respuesta registrada para una ruta gana; sin respuesta -> 404.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<Vec<(HttpMethod, String, Reply)>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn on(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push((method, path.to_string(), Ok(HttpResponse::new(status, body))));
    }

    pub fn fail(&self, method: HttpMethod, path: &str, error: AppError) {
        self.replies
            .borrow_mut()
            .push((method, path.to_string(), Err(error)));
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }

    pub fn last_request(&self, path: &str) -> Option<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.url.ends_with(path))
            .cloned()
    }

    fn reply_for(&self, request: &HttpRequest) -> Reply {
        self.replies
            .borrow()
            .iter()
            .rev()
            .find(|(method, path, _)| *method == request.method && request.url.ends_with(path.as_str()))
            .map(|(_, _, reply)| reply.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "")))
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        self.requests.borrow_mut().push(request.clone());
        YieldNow(false).await;
        self.reply_for(&request)
    }
}

/// Sesión + transporte + factory conectados como en la app
pub struct Fixture {
    pub transport: Rc<MockTransport>,
    pub storage: MemoryStorage,
    pub session: SessionStore,
    pub factory: Rc<ClientFactory>,
}

impl Fixture {
    pub fn new() -> Self {
        let transport = Rc::new(MockTransport::default());
        let storage = MemoryStorage::new();
        let session = SessionStore::new(Rc::new(storage.clone()));
        let config = AppConfig {
            build_api_url: None,
            default_api_url: TEST_API_URL.to_string(),
            ..AppConfig::default()
        };
        let factory = Rc::new(ClientFactory::new(config, transport.clone(), session.clone()));
        Self {
            transport,
            storage,
            session,
            factory,
        }
    }

    pub fn with_role(role: &str) -> Self {
        let fx = Self::new();
        fx.session.set("test-token", role).expect("memory storage never fails");
        fx
    }
}
