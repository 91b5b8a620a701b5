//! Client-side views of JeevanDhara backend data.
//!
//! Read types accept both the backend's snake_case keys and the camelCase
//! spellings used by older front-end revisions. Write payloads use exactly
//! the keys each endpoint reads.

pub mod errors;
pub mod page;
pub mod session;
pub mod auth;
pub mod donor;
pub mod hospital;
pub mod admin;

pub use errors::ModelError;
pub use page::Page;
pub use session::{Role, Session};

/// Plain `{ "msg": ... }` acknowledgement returned by most write endpoints.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub msg: Option<String>,
    /// Any other keys (`unitId`, `requestId`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApiMessage {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}
