//! Auth DTOs

use serde::{Deserialize, Serialize};

use crate::domain::session::{Session, SessionError};
use crate::domain::user::{Role, User};

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Job seeker registration form
///
/// `password2` is the confirmation field; the server validates it again but
/// the client refuses to submit a form where the two differ.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

impl RegisterRequest {
    pub fn passwords_match(&self) -> bool {
        self.password == self.password2
    }
}

/// Body of `/auth/logout/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Access/refresh pair issued on login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// User object of an auth response; carries the tokens alongside the profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(flatten)]
    pub profile: User,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
}

/// Response of `/auth/login/` and `/auth/register/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.profile.role)
    }
}

impl TryFrom<AuthResponse> for Session {
    type Error = SessionError;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        let user = response
            .user
            .ok_or_else(|| SessionError::Malformed("response has no user".into()))?;
        let tokens = user
            .tokens
            .ok_or_else(|| SessionError::Malformed("response has no tokens".into()))?;
        Session::new(tokens.access, tokens.refresh, user.profile)
    }
}
