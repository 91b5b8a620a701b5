use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::session::Role;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ModelError::Validation("password required".into()));
        }
        Ok(())
    }
}

/// Registration input; `blood_type` is sent snake_case because that is the
/// key `/auth/signup` reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "userType")]
    pub role: Role,
}

impl SignupInput {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        validate_email(&self.email)?;
        if self.password.len() < 6 {
            return Err(ModelError::Validation("password too short (>=6)".into()));
        }
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "bloodType")]
    pub blood_type: Option<String>,
    #[serde(default, alias = "userType", alias = "userRole")]
    pub role: Option<Role>,
}

/// Body of `/auth/login` and `/auth/signup` responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default, alias = "userType", alias = "userRole")]
    pub role: Option<Role>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl AuthResponse {
    /// Role reported by the server, falling back to the one the user picked.
    pub fn resolved_role(&self, requested: Role) -> Role {
        self.role
            .or_else(|| self.user.as_ref().and_then(|u| u.role))
            .unwrap_or(requested)
    }
}
