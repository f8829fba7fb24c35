//! Error types for the JobScout client

use std::collections::BTreeMap;

use jobscout_core::domain::session::SessionError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the JobScout client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the credentials of the call (HTTP 401)
    ///
    /// By the time a caller sees this, the session store has already been
    /// cleared and `AuthEvent::SessionExpired` published.
    #[error("Not authorized: {message}")]
    Unauthorized {
        /// Error message from the API, or a generic one if it sent none
        message: String,
        /// Messages parsed from the response body; empty if it had none
        errors: FieldErrors,
    },

    /// The server rejected the request (4xx other than 401)
    #[error("Request rejected (status {status}): {errors}")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Field-keyed messages from the response body
        errors: FieldErrors,
    },

    /// Login was refused
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A client-side check failed before any request was sent
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a server error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The server answered with an unusable session
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Reading or writing the session store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Client-side checks that stop a request from being sent
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Passwords don't match")]
    PasswordMismatch,

    #[error("A scraper trigger is already in flight")]
    TriggerInFlight,

    #[error("The scraper is already running")]
    ScraperAlreadyRunning,
}

/// Errors raised by session stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Malformed(#[from] SessionError),

    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error forced a logout
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if this error carries messages meant for a form
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidCredentials(_)
        )
    }

    /// Check if this error was raised before reaching the network
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Check if this error should be shown as a generic failure notice
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::ApiError { .. } | Self::ParseError(_)
        )
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Validation { status: 404, .. })
    }

    /// Field-keyed messages, if the server sent any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } | Self::Unauthorized { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Field-keyed error messages from a rejected request
///
/// The server answers form errors with an object mapping each field to a
/// message or a list of messages. Bodies that are not JSON objects end up
/// under [`FieldErrors::GENERAL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Key used for messages not tied to a field
    pub const GENERAL: &'static str = "general";

    /// Keys the server uses for form-wide messages, in lookup order
    const MESSAGE_KEYS: [&'static str; 5] =
        ["error", "detail", "message", "non_field_errors", Self::GENERAL];

    /// Parses an error response body
    pub fn from_body(body: &str) -> Self {
        let mut errors = BTreeMap::new();

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(fields)) => {
                for (field, value) in fields {
                    let messages = flatten_messages(value);
                    if !messages.is_empty() {
                        errors.insert(field, messages);
                    }
                }
            }
            _ => {
                let text = body.trim();
                if !text.is_empty() {
                    errors.insert(Self::GENERAL.to_string(), vec![text.to_string()]);
                }
            }
        }

        Self(errors)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First form-wide message (`error`, `detail`, `message`, ...)
    pub fn message(&self) -> Option<&str> {
        Self::MESSAGE_KEYS
            .iter()
            .find_map(|key| self.0.get(*key))
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no details");
        }
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

fn flatten_messages(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::String(message) => vec![message],
        serde_json::Value::Array(items) => items.into_iter().flat_map(flatten_messages).collect(),
        other => vec![other.to_string()],
    }
}
