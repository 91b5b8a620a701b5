//! Request layer of the JeevanDhara client.
//! - `http`: the single request function (URL assembly, bearer token, body
//!   encoding, error normalization).
//! - `api`: role-grouped facades mapping named operations to endpoints.
//! - `storage`: persisted client storage holding the session.

pub mod errors;
pub mod http;
pub mod api;
pub mod storage;
pub mod navigation;
pub mod observability;

pub use api::Api;
pub use errors::ClientError;
pub use http::{ApiClient, RequestBody, RequestOptions};
pub use navigation::Navigator;
pub use storage::{ClientStorage, SessionStore};
