//! Auth-related API endpoints
//!
//! These are the raw calls. Session bookkeeping around them (persisting on
//! login, clearing on logout) lives in [`crate::AuthGateway`].

use crate::ApiClient;
use crate::error::Result;
use jobscout_core::domain::user::User;
use jobscout_core::dto::auth::{AuthResponse, LoginRequest, LogoutRequest, RegisterRequest};

impl ApiClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Create a job seeker account
    ///
    /// # Arguments
    /// * `req` - The registration form
    ///
    /// # Returns
    /// The auth response carrying the new account and its tokens
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        let url = format!("{}/api/auth/register/", self.base_url);
        let response = self.send(self.client.post(&url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Authenticate with username and password
    ///
    /// # Arguments
    /// * `req` - The login form
    ///
    /// # Returns
    /// The auth response carrying the account, its role and its tokens
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let url = format!("{}/api/auth/login/", self.base_url);
        let response = self.send(self.client.post(&url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Invalidate a refresh token on the server
    ///
    /// # Arguments
    /// * `refresh_token` - The token to blacklist
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let url = format!("{}/api/auth/logout/", self.base_url);
        let body = LogoutRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self.send(self.client.post(&url).json(&body)).await?;

        self.handle_empty_response(response).await
    }

    /// Fetch the identity behind the current access token
    ///
    /// # Returns
    /// The profile of the logged-in user
    pub async fn me(&self) -> Result<User> {
        let url = format!("{}/api/auth/me/", self.base_url);
        let response = self.send(self.client.get(&url)).await?;

        self.handle_response(response).await
    }
}
