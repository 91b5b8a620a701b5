//! Role-grouped facades. Each operation maps 1:1 to a backend endpoint.

pub mod auth;
pub mod donor;
pub mod hospital;
pub mod admin;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use donor::DonorApi;
pub use hospital::HospitalApi;

use crate::http::ApiClient;
use crate::storage::SessionStore;

/// All four facades over one shared client.
#[derive(Clone)]
pub struct Api {
    pub auth: AuthApi,
    pub donor: DonorApi,
    pub hospital: HospitalApi,
    pub admin: AdminApi,
    client: ApiClient,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            donor: DonorApi::new(client.clone()),
            hospital: HospitalApi::new(client.clone()),
            admin: AdminApi::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.client.storage())
    }
}
