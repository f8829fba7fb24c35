//! Configuration module
//!
//! Handles CLI configuration: where the API lives, where the session is
//! persisted between invocations and how long to wait on the network.

use std::path::PathBuf;
use std::time::Duration;

/// Default API server origin
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the API server (e.g., "http://localhost:8000")
    pub api_url: String,

    /// JSON document holding the persisted session
    pub session_file: PathBuf,

    /// Per-request timeout
    pub timeout: Duration,

    /// How often `admin monitor` refreshes while the scraper runs
    pub poll_interval: Duration,
}

impl Config {
    /// Creates a configuration with default timings
    pub fn new(api_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            session_file,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(10),
        }
    }

    /// Session file location when none is given
    ///
    /// Falls back to the working directory on platforms without a config
    /// directory.
    pub fn default_session_file() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("jobscout"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("session.json")
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.session_file.as_os_str().is_empty() {
            anyhow::bail!("session_file cannot be empty");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string(), Self::default_session_file())
    }
}
