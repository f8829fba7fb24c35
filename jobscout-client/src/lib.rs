//! JobScout HTTP Client
//!
//! A type-safe client for the job-listing API, shared by every JobScout
//! front end.
//!
//! The crate is organised around one transport, [`ApiClient`], which every
//! server call goes through. It attaches the stored access token to each
//! request and, whenever the server answers 401, clears the
//! [`SessionStore`] and publishes [`AuthEvent::SessionExpired`] before
//! handing the error back. On top of it sit:
//! - [`AuthGateway`]: login, registration and logout flows
//! - [`OperationalMonitor`]: the admin dashboard's scraper polling loop
//! - [`JobFilterEngine`]: the job seeker's filtered job list
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobscout_client::{ApiClient, AuthGateway, MemorySessionStore};
//! use jobscout_core::dto::auth::LoginRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new("http://localhost:8000", Arc::new(MemorySessionStore::new()));
//!     let gateway = AuthGateway::new(client);
//!
//!     let outcome = gateway.login(LoginRequest::new("admin", "admin123")).await?;
//!     println!("Logged in as {}, landing on {}", outcome.session.user.username, outcome.landing);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod filter;
pub mod gateway;
pub mod monitor;
pub mod session;

mod auth;
mod jobs;
mod scraper;

// Re-export commonly used types
pub use error::{ClientError, FieldErrors, PreconditionError, Result, StoreError};
pub use filter::{FetchOutcome, JobFilterEngine};
pub use gateway::{AuthGateway, AuthOutcome};
pub use monitor::{DashboardSnapshot, MonitorConfig, MonitorHandle, OperationalMonitor};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

use std::sync::Arc;

use jobscout_core::domain::user::Role;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

/// Capacity of the auth event channel
const AUTH_EVENT_CAPACITY: usize = 16;

/// Session lifecycle notifications
///
/// The application layer subscribes to these to decide where to navigate;
/// the transport never navigates by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A session was created by login or registration
    LoggedIn { role: Role },
    /// The user logged out
    LoggedOut,
    /// The server rejected a request with 401 and the session was dropped
    SessionExpired,
}

/// HTTP client for the job-listing API
///
/// Cloning is cheap: clones share the connection pool, the session store
/// and the event channel.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL of the server (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Where the current session lives
    store: Arc<dyn SessionStore>,
    /// Session lifecycle notifications
    events: broadcast::Sender<AuthEvent>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.store.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The server URL; API paths are resolved under `/api`
    /// * `store` - The session store shared with the rest of the application
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use jobscout_client::{ApiClient, MemorySessionStore};
    ///
    /// let client = ApiClient::new("http://localhost:8000", Arc::new(MemorySessionStore::new()));
    /// ```
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self::with_client(base_url, Client::new(), store)
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use jobscout_client::{ApiClient, MemorySessionStore};
    /// use reqwest::Client;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApiClient::with_client(
    ///     "http://localhost:8000",
    ///     http_client,
    ///     Arc::new(MemorySessionStore::new()),
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let base_url = base_url.into();
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            store,
            events,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client reads credentials from
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    pub(crate) fn publish(&self, event: AuthEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    // =============================================================================
    // Transport
    // =============================================================================

    /// Sends a request through the authorization interceptor
    ///
    /// Every endpoint method funnels through here; there is no other path
    /// to the network. A 401 clears the session exactly once and is
    /// returned as `ClientError::Unauthorized`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.store.read() {
            Some(session) => request.bearer_auth(&session.access_token),
            None => request,
        };

        let response = request.send().await?;
        debug!(status = response.status().as_u16(), url = %response.url(), "Received response");

        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            let errors = FieldErrors::from_body(&body);
            let message = errors
                .message()
                .unwrap_or("authentication required")
                .to_string();
            self.invalidate_session();
            return Err(ClientError::Unauthorized { message, errors });
        }

        Ok(response)
    }

    /// Drops the session after the server refused our credentials
    fn invalidate_session(&self) {
        warn!("Server rejected credentials, clearing session");
        if let Err(e) = self.store.clear() {
            error!("Failed to clear session store: {}", e);
        }
        self.publish(AuthEvent::SessionExpired);
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed
    async fn handle_empty_response(&self, response: Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status.is_client_error() {
            Err(ClientError::Validation {
                status: status.as_u16(),
                errors: FieldErrors::from_body(&error_text),
            })
        } else {
            Err(ClientError::api_error(status.as_u16(), error_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Arc<dyn SessionStore> {
        Arc::new(MemorySessionStore::new())
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:8000", store());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/", store());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ApiClient::with_client("http://localhost:8000", http_client, store());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_clones_share_event_channel() {
        let client = ApiClient::new("http://localhost:8000", store());
        let mut events = client.subscribe();
        client.clone().publish(AuthEvent::LoggedOut);
        assert_eq!(events.recv().await.unwrap(), AuthEvent::LoggedOut);
    }
}
