//! Shared utilities for integration testing: mock registry / CDN servers
//! and a gateway bound to an ephemeral port.

use axum::body::Body;
use axum::http::{header, Response, StatusCode, Uri};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use npm_cdn_gateway::config::GatewayConfig;
use npm_cdn_gateway::{HttpServer, Shutdown};

/// A canned response for one path.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl MockResponse {
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            location: None,
            body: body.into(),
        }
    }

    /// A 200 without a Content-Type header.
    #[allow(dead_code)]
    pub fn untyped(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: None,
            location: None,
            body: body.into(),
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::ok("application/json", value.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain"),
            location: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[allow(dead_code)]
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            content_type: None,
            location: Some(location.to_string()),
            body: Vec::new(),
        }
    }
}

/// A running mock server.
pub struct MockServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, matched or not.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a server answering from `routes` (keyed by request path), 404 otherwise.
pub async fn start_mock_server(routes: Vec<(String, MockResponse)>) -> MockServer {
    let routes: Arc<HashMap<String, MockResponse>> = Arc::new(routes.into_iter().collect());
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    let app = Router::new().fallback(move |uri: Uri| {
        let routes = routes.clone();
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let mock = routes
                .get(uri.path())
                .cloned()
                .unwrap_or_else(|| MockResponse::status(404, "Not Found"));

            let mut builder = Response::builder()
                .status(StatusCode::from_u16(mock.status).unwrap());
            if let Some(content_type) = mock.content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            if let Some(location) = mock.location {
                builder = builder.header(header::LOCATION, location);
            }
            builder.body(Body::from(mock.body)).unwrap()
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockServer { addr, hits }
}

/// Start a mock registry serving the given manifests at `/{package}`.
#[allow(dead_code)]
pub async fn start_mock_registry(manifests: Vec<(&str, MockResponse)>) -> MockServer {
    start_mock_server(
        manifests
            .into_iter()
            .map(|(package, response)| (format!("/{}", package), response))
            .collect(),
    )
    .await
}

/// Start a backend that accepts connections and closes them without a reply.
#[allow(dead_code)]
pub async fn start_hangup_backend() -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    drop(socket);
                }
                Err(_) => break,
            }
        }
    });

    MockServer { addr, hits }
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Gateway configuration pointing at local mocks, with short timeouts.
#[allow(dead_code)]
pub fn gateway_config(registry: &str, origins: Vec<String>) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.registry.url = registry.to_string();
    config.registry.timeout_secs = 5;
    config.cdn.origins = origins;
    config.cdn.timeout_secs = 5;
    config.cdn.retries = 0;
    config.timeouts.connect_secs = 2;
    config.retries.base_delay_ms = 10;
    config.retries.max_delay_ms = 20;
    config
}

/// Run a gateway on an ephemeral port until the returned `Shutdown` fires.
#[allow(dead_code)]
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that talks to local sockets directly and does not follow redirects.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
