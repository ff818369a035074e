//! Stub downloader and proxy wiring shared by the integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::{RawQuery, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use pinterest_proxy::{api::routes::create_router, config::Config, AppState};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// What the stub answers with on every call.
#[derive(Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl StubReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }
}

/// One request observed by the stub.
#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub query: Option<String>,
    pub headers: HeaderMap,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct StubDownloader {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubDownloader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> SeenRequest {
        self.seen.lock().unwrap().last().cloned().expect("stub was never called")
    }
}

async fn stub_handler(
    State(state): State<StubState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.seen.lock().unwrap().push(SeenRequest { query, headers });
    tokio::time::sleep(state.reply.delay).await;

    let status = StatusCode::from_u16(state.reply.status).unwrap();
    (status, state.reply.body.clone()).into_response()
}

/// Serves `reply` on an ephemeral local port.
pub async fn start_stub(reply: StubReply) -> StubDownloader {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        calls: calls.clone(),
        seen: seen.clone(),
    };

    let app = Router::new()
        .route("/frontendService/DownloaderService", get(stub_handler))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubDownloader {
        base_url: format!("http://{}/frontendService/DownloaderService?url=", addr),
        calls,
        seen,
    }
}

/// Answers every request with `status` headers promising `Content-Length: 100`,
/// writes a few body bytes, then stalls.
pub async fn start_stalling_stub(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{{\"err",
                            status_line
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.flush().await;
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}/frontendService/DownloaderService?url=", addr)
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn proxy_app(base_url: &str, timeout: Duration) -> Router {
    let mut config = Config::from_values(Some("0".into()), base_url).unwrap();
    config.upstream_timeout = timeout;
    create_router(AppState::new(&config).unwrap())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn data_uri(post_url: &str) -> String {
    format!("/get_pinterest_data?url={}", urlencoding::encode(post_url))
}
