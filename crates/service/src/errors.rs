use serde::Deserialize;
use thiserror::Error;

/// Shown when a failed response carries no usable `msg`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: DNS, refused connection, timeout, broken body stream.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` is the server's `msg` or the fallback.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Model(#[from] models::ModelError),
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
}

impl ClientError {
    /// Build the error for a non-2xx response from its raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.msg)
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        ClientError::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
