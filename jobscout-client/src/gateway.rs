//! Login, registration and logout flows
//!
//! The gateway is the only component that creates sessions. It turns auth
//! responses into a [`Session`], persists it and tells the caller where to
//! navigate next.

use jobscout_core::domain::route::Route;
use jobscout_core::domain::session::Session;
use jobscout_core::domain::user::{Role, User};
use jobscout_core::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::{info, warn};

use crate::error::{ClientError, PreconditionError, Result};
use crate::{ApiClient, AuthEvent};

/// Fallback message when a rejected login carries none
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Result of a successful login or registration
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub session: Session,
    pub role: Role,
    /// View to navigate to next
    pub landing: Route,
}

/// Authentication flows on top of [`ApiClient`]
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: ApiClient,
}

impl AuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Log in and persist the resulting session
    ///
    /// Any 4xx answer (401 included) is reported as
    /// `ClientError::InvalidCredentials` with the server's message.
    pub async fn login(&self, credentials: LoginRequest) -> Result<AuthOutcome> {
        info!("Logging in as {}", credentials.username);

        let response = self
            .client
            .login(&credentials)
            .await
            .map_err(Self::as_invalid_credentials)?;

        let outcome = self.establish(response, None)?;
        info!(
            "Logged in as {} ({})",
            outcome.session.user.username, outcome.role
        );
        Ok(outcome)
    }

    /// Register a job seeker account and persist the resulting session
    ///
    /// Fails with `PreconditionError::PasswordMismatch` without contacting
    /// the server if the two password fields differ. Server-side form
    /// errors come back untouched as `ClientError::Validation`.
    pub async fn register(&self, profile: RegisterRequest) -> Result<AuthOutcome> {
        if !profile.passwords_match() {
            return Err(PreconditionError::PasswordMismatch.into());
        }

        info!("Registering account {}", profile.username);
        let response = self.client.register(&profile).await?;

        let outcome = self.establish(response, Some(Route::Dashboard))?;
        info!("Registered account {}", outcome.session.user.username);
        Ok(outcome)
    }

    /// Log out locally, telling the server on a best-effort basis
    ///
    /// The server call invalidates the refresh token; if it fails the
    /// failure is logged and the local session is cleared anyway.
    pub async fn logout(&self) -> Result<()> {
        let store = self.client.session_store();

        if let Some(refresh_token) = store.refresh_token() {
            if let Err(e) = self.client.logout(&refresh_token).await {
                warn!("Server-side logout failed, clearing local session anyway: {}", e);
            }
        }

        store.clear()?;
        self.client.publish(AuthEvent::LoggedOut);
        info!("Logged out");
        Ok(())
    }

    /// Fetch the live identity of the current session
    pub async fn current_user(&self) -> Result<User> {
        self.client.me().await
    }

    fn establish(&self, response: AuthResponse, landing: Option<Route>) -> Result<AuthOutcome> {
        let session = Session::try_from(response)?;
        self.client.session_store().save(&session)?;

        let role = session.role();
        self.client.publish(AuthEvent::LoggedIn { role });

        Ok(AuthOutcome {
            landing: landing.unwrap_or_else(|| Route::landing_for(role)),
            session,
            role,
        })
    }

    fn as_invalid_credentials(error: ClientError) -> ClientError {
        match error {
            ClientError::Unauthorized { errors, .. } | ClientError::Validation { errors, .. } => {
                ClientError::InvalidCredentials(
                    errors.message().unwrap_or(INVALID_CREDENTIALS).to_string(),
                )
            }
            other => other,
        }
    }
}
