//! Stub backend: records every request and answers through a closure.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    /// Path with the `/api` prefix stripped.
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }

    pub fn target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }
}

type Responder = Arc<dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct StubState {
    log: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
}

pub struct Stub {
    pub base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    pub async fn start<F>(respond: F) -> anyhow::Result<Self>
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = StubState { log: Arc::clone(&log), respond: Arc::new(respond) };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr: SocketAddr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await { eprintln!("stub server error: {}", e); }
        });
        Ok(Self { base_url: format!("http://{}/api", addr), log })
    }

    /// Answer every request with the same status and body.
    pub async fn fixed(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request recorded")
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let rec = Recorded { method, path, query: uri.query().map(str::to_string), headers, body };
    let (status, body) = (state.respond)(&rec);
    state.log.lock().unwrap().push(rec);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
