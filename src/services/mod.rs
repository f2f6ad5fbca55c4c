pub mod http;
pub mod api_client;
pub mod client_factory;

pub use api_client::ApiClient;
pub use client_factory::ClientFactory;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
