//! Session domain types
//!
//! A session bundles the access token, the refresh token and the profile of
//! the signed-in user. It either exists as a whole or not at all: there is
//! no way to build a `Session` with a missing or empty token.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::{Role, User};

/// Errors raised while building or validating a session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The auth payload lacked tokens or a user profile
    #[error("malformed session: {0}")]
    Malformed(String),
}

/// Authenticated identity held by the client while logged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl Session {
    /// Creates a session, rejecting empty tokens
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user: User,
    ) -> Result<Self, SessionError> {
        let session = Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            user,
        };
        session.validate()?;
        Ok(session)
    }

    /// Checks the both-tokens-or-nothing invariant
    ///
    /// Sessions can also arrive through deserialization (e.g. from a
    /// persisted store), which bypasses [`Session::new`].
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.access_token.trim().is_empty() {
            return Err(SessionError::Malformed("access token is empty".into()));
        }
        if self.refresh_token.trim().is_empty() {
            return Err(SessionError::Malformed("refresh token is empty".into()));
        }
        Ok(())
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role.is_admin()
    }
}
