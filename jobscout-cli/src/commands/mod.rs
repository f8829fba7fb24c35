//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod admin;
mod auth;
mod jobs;

pub use admin::AdminCommands;
pub use auth::AuthCommands;
pub use jobs::JobsCommands;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use colored::*;
use jobscout_client::{ApiClient, AuthEvent, FileSessionStore, SessionStore};
use jobscout_core::domain::route::{GuardDecision, Route, guard_route};
use jobscout_core::domain::session::Session;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use crate::config::Config;

/// Upper bound on waiting for pending auth notices at exit
const LISTENER_DRAIN: Duration = Duration::from_millis(200);

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, sign up and sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Browse and check off job links
    Jobs {
        #[command(subcommand)]
        command: JobsCommands,
    },
    /// Scraper dashboard (admins only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let ctx = AppContext::build(config)?;

    let result = match command {
        Commands::Auth { command } => auth::handle_auth_command(command, &ctx).await,
        Commands::Jobs { command } => jobs::handle_jobs_command(command, &ctx).await,
        Commands::Admin { command } => admin::handle_admin_command(command, &ctx).await,
    };

    ctx.shutdown().await;
    result
}

/// Shared state for one CLI invocation
pub struct AppContext {
    pub config: Config,
    pub client: ApiClient,
    pub store: Arc<FileSessionStore>,
    notices: Arc<AuthNotices>,
    listener: JoinHandle<()>,
}

impl AppContext {
    /// Open the persisted session and build the API client around it
    pub fn build(config: &Config) -> Result<Self> {
        let store = Arc::new(FileSessionStore::open(&config.session_file).with_context(|| {
            format!(
                "Failed to open session file {}",
                config.session_file.display()
            )
        })?);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let client = ApiClient::with_client(
            config.api_url.clone(),
            http,
            store.clone() as Arc<dyn SessionStore>,
        );

        let notices = Arc::new(AuthNotices::default());
        let listener = tokio::spawn(watch_auth_events(client.subscribe(), notices.clone()));

        Ok(Self {
            config: config.clone(),
            client,
            store,
            notices,
            listener,
        })
    }

    /// Silence the expiry notice for the rest of this run
    ///
    /// Logging out with a stale access token gets a 401 from the server,
    /// which is not news to a user who is signing out anyway.
    pub fn begin_logout(&self) {
        self.notices.logging_out.store(true, Ordering::Release);
    }

    /// Let the auth event listener drain before the process exits
    pub async fn shutdown(self) {
        let Self {
            client, listener, ..
        } = self;
        drop(client);
        if time::timeout(LISTENER_DRAIN, listener).await.is_err() {
            debug!("Auth event listener still busy at exit");
        }
    }

    /// Session allowed to open `route`, or an error naming where to go instead
    pub fn require(&self, route: Route) -> Result<Session> {
        let session = self.store.read();
        match guard_route(session.as_ref(), route) {
            GuardDecision::Allow => session.context("Not logged in"),
            GuardDecision::RedirectToLogin => {
                anyhow::bail!("Not logged in. Run `{}` first.", command_for(Route::Login))
            }
            GuardDecision::RedirectToDashboard => anyhow::bail!(
                "This command requires an admin account. Try `{}` instead.",
                command_for(Route::Dashboard)
            ),
        }
    }
}

/// Command that opens a view
pub fn command_for(route: Route) -> &'static str {
    match route {
        Route::Login => "jobscout auth login",
        Route::Register => "jobscout auth register",
        Route::Dashboard => "jobscout jobs list",
        Route::AdminDashboard => "jobscout admin status",
    }
}

/// Read one line from stdin after printing a label
pub fn prompt(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Ask a yes/no question; anything but y/yes is a no
pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Report session lifecycle changes that happen in the background
async fn watch_auth_events(
    mut events: broadcast::Receiver<AuthEvent>,
    notices: Arc<AuthNotices>,
) {
    loop {
        match events.recv().await {
            Ok(event) if notices.should_report(event) => print_session_expired(),
            Ok(event) => debug!(?event, "Auth event"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "Auth event listener lagged")
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}

/// Decides which auth events deserve a message on the terminal
#[derive(Debug, Default)]
struct AuthNotices {
    logging_out: AtomicBool,
}

impl AuthNotices {
    fn should_report(&self, event: AuthEvent) -> bool {
        event == AuthEvent::SessionExpired && !self.logging_out.load(Ordering::Acquire)
    }
}

fn print_session_expired() {
    eprintln!(
        "{}",
        format!(
            "Your session has expired. Run `{}` to sign in again.",
            command_for(Route::Login)
        )
        .yellow()
    );
}
