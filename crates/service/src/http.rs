use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::errors::ClientError;
use crate::observability::{REQUESTS_TOTAL, REQUEST_DURATION, REQUEST_FAILURES_TOTAL};
use crate::storage::{ClientStorage, AUTH_TOKEN_KEY};

/// Request payload. `Json` values are serialized; `Raw` strings go out verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(String),
}

/// Per-call options: method, body, extra headers and query pairs.
/// Extra headers replace the defaults of the same name.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn put() -> Self {
        Self::method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::method(Method::DELETE)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append the fields of a flat serializable struct as query pairs.
    /// `None` fields must be skipped by the struct's serde attributes.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, ClientError> {
        let value = serde_json::to_value(query).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let serde_json::Value::Object(fields) = value else {
            return Err(ClientError::InvalidRequest("query must serialize to an object".into()));
        };
        for (k, v) in fields {
            let v = match v {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            self.query.push((k, v));
        }
        Ok(self)
    }
}

/// Low-level API client: one base URL, one storage handle for the token.
///
/// Cheap to clone; clones share the connection pool and the storage.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    storage: Arc<dyn ClientStorage>,
}

impl ApiClient {
    pub fn new(base_url: &str, storage: Arc<dyn ClientStorage>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, storage)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            storage,
        }
    }

    /// Build a client with the configured timeouts.
    pub fn from_config(cfg: &configs::ApiConfig, storage: Arc<dyn ClientStorage>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self::with_http(http, &cfg.base_url, storage))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> Arc<dyn ClientStorage> {
        Arc::clone(&self.storage)
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Perform one request and decode the JSON body.
    ///
    /// Every failure (transport, non-2xx, undecodable body) is logged here
    /// before it is returned. An empty 2xx body decodes as JSON `null`, or as
    /// `{}` when the target type is object-shaped.
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ClientError> {
        REQUESTS_TOTAL.inc();
        let started = Instant::now();
        let result = self.send(endpoint, options).await;
        REQUEST_DURATION.observe(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            REQUEST_FAILURES_TOTAL.inc();
            error!(endpoint, status = ?e.status(), error = %e, "API request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ClientError> {
        let headers = self.headers(&options.headers).await?;
        let mut req = self.http.request(options.method, self.url(endpoint)).headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        req = match options.body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
                req.body(bytes)
            }
            Some(RequestBody::Raw(text)) => req.body(text),
            None => req,
        };

        let resp = req.send().await.map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(endpoint, status = status.as_u16(), len = bytes.len(), "response received");

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &bytes));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"null")
                .or_else(|_| serde_json::from_slice(b"{}"))
                .map_err(|e| ClientError::Decode(e.to_string()));
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Defaults (JSON content type, bearer token when stored) overlaid with
    /// the caller's headers.
    async fn headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.storage.get_item(AUTH_TOKEN_KEY).await.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::InvalidRequest("stored token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidRequest(format!("header {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidRequest(format!("header {name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn query_skips_nulls_and_stringifies() {
        #[derive(Serialize)]
        struct Q {
            search: Option<String>,
            page: u32,
            location: Option<String>,
        }
        let opts = RequestOptions::get()
            .query(&Q { search: Some("O+".into()), page: 2, location: None })
            .unwrap();
        assert!(opts.query.contains(&("search".to_string(), "O+".to_string())));
        assert!(opts.query.contains(&("page".to_string(), "2".to_string())));
        assert_eq!(opts.query.len(), 2);
    }

    #[test]
    fn query_rejects_non_objects() {
        assert!(RequestOptions::get().query(&["a", "b"]).is_err());
    }

    #[test]
    fn url_joins_base_and_endpoint() {
        let c = ApiClient::new("http://localhost:5000/api/", Arc::new(MemoryStorage::new()));
        assert_eq!(c.url("/donor/profile"), "http://localhost:5000/api/donor/profile");
    }

    #[tokio::test]
    async fn custom_headers_override_defaults() -> Result<(), ClientError> {
        let storage = Arc::new(MemoryStorage::with_items([(AUTH_TOKEN_KEY, "abc")]));
        let c = ApiClient::new("http://x", storage);
        let h = c.headers(&[("Content-Type".into(), "text/plain".into())]).await?;
        assert_eq!(h.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(h.get(AUTHORIZATION).unwrap(), "Bearer abc");
        Ok(())
    }
}
