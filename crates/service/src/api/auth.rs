use models::auth::{AuthResponse, LoginInput, SignupInput};
use models::Page;
use tracing::{info, instrument, warn};

use crate::errors::ClientError;
use crate::http::{ApiClient, RequestOptions};
use crate::navigation::Navigator;
use crate::storage::SessionStore;

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: &LoginInput) -> Result<AuthResponse, ClientError> {
        input.validate()?;
        self.client.request("/auth/login", RequestOptions::post().json(input)?).await
    }

    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn signup(&self, input: &SignupInput) -> Result<AuthResponse, ClientError> {
        input.validate()?;
        self.client.request("/auth/signup", RequestOptions::post().json(input)?).await
    }

    /// Local sign-out: clear the session keys and go to the login page.
    /// Never fails; a storage error is logged and navigation still happens.
    pub async fn logout(&self, navigator: &dyn Navigator) {
        let session = SessionStore::new(self.client.storage());
        match session.clear().await {
            Ok(()) => info!("signed out"),
            Err(e) => warn!(error = %e, "sign-out could not clear storage"),
        }
        navigator.navigate(Page::Login);
    }
}
