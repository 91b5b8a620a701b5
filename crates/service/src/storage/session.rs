use std::sync::Arc;

use models::{Role, Session};
use tracing::{debug, warn};

use super::ClientStorage;
use crate::errors::ClientError;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_TYPE_KEY: &str = "userType";
/// Older builds stored the role under this key.
pub const USER_ROLE_KEY: &str = "userRole";

/// Typed view over the session keys in [`ClientStorage`].
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Current token; an empty string counts as absent.
    pub async fn token(&self) -> Option<String> {
        self.storage.get_item(AUTH_TOKEN_KEY).await.filter(|t| !t.is_empty())
    }

    /// Both a token and a recognizable role are needed for a session.
    pub async fn load(&self) -> Option<Session> {
        let token = self.token().await?;
        let raw_role = match self.storage.get_item(USER_TYPE_KEY).await {
            Some(r) => r,
            None => self.storage.get_item(USER_ROLE_KEY).await?,
        };
        match raw_role.parse::<Role>() {
            Ok(role) => Some(Session { token, role }),
            Err(e) => {
                warn!(error = %e, "stored role not recognized; treating as signed out");
                None
            }
        }
    }

    pub async fn save(&self, session: &Session) -> Result<(), ClientError> {
        self.storage.set_item(AUTH_TOKEN_KEY, session.token.clone()).await?;
        self.storage.set_item(USER_TYPE_KEY, session.role.as_str().to_string()).await?;
        debug!(role = %session.role, "session stored");
        Ok(())
    }

    /// Remove every session key. All removals are attempted; the first
    /// failure is returned.
    pub async fn clear(&self) -> Result<(), ClientError> {
        let mut first_err = None;
        for key in [AUTH_TOKEN_KEY, USER_TYPE_KEY, USER_ROLE_KEY] {
            if let Err(e) = self.storage.remove_item(key).await {
                warn!(key, error = %e, "failed to clear session key");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
