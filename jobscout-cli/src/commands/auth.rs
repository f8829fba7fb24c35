//! Auth command handlers
//!
//! Login, registration, logout and identity lookup. A successful login or
//! registration persists the session for later invocations.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use jobscout_client::{AuthGateway, AuthOutcome, ClientError, SessionStore};
use jobscout_core::domain::route::Route;
use jobscout_core::dto::auth::{LoginRequest, RegisterRequest};

use super::{AppContext, command_for, prompt};
use crate::output::{print_client_error, print_user};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in with username and password
    Login {
        username: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "JOBSCOUT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create a job seeker account
    Register {
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Password (prompted for when omitted)
        #[arg(long, env = "JOBSCOUT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Password confirmation (prompted for when omitted)
        #[arg(long)]
        password_confirm: Option<String>,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the account of the current session
    Whoami,
}

/// Handle auth commands
///
/// # Arguments
/// * `command` - The auth command to execute
/// * `ctx` - Client and session store for this invocation
pub async fn handle_auth_command(command: AuthCommands, ctx: &AppContext) -> Result<()> {
    let gateway = AuthGateway::new(ctx.client.clone());

    match command {
        AuthCommands::Login { username, password } => {
            let password = password.map_or_else(|| prompt("Password"), Ok)?;
            login(&gateway, LoginRequest::new(username, password)).await
        }
        AuthCommands::Register {
            username,
            email,
            first_name,
            last_name,
            phone,
            password,
            password_confirm,
        } => {
            let password = password.map_or_else(|| prompt("Password"), Ok)?;
            let password2 = password_confirm.map_or_else(|| prompt("Confirm password"), Ok)?;
            let form = RegisterRequest {
                username,
                email,
                password,
                password2,
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
            };
            register(&gateway, form).await
        }
        AuthCommands::Logout => logout(&gateway, ctx).await,
        AuthCommands::Whoami => whoami(&gateway, ctx).await,
    }
}

async fn login(gateway: &AuthGateway, credentials: LoginRequest) -> Result<()> {
    match gateway.login(credentials).await {
        Ok(outcome) => {
            print_welcome("Logged in", &outcome);
            Ok(())
        }
        Err(ClientError::InvalidCredentials(message)) => anyhow::bail!("Login failed: {}", message),
        Err(e) => Err(e).context("Login failed"),
    }
}

async fn register(gateway: &AuthGateway, form: RegisterRequest) -> Result<()> {
    match gateway.register(form).await {
        Ok(outcome) => {
            print_welcome("Account created", &outcome);
            Ok(())
        }
        Err(e) if e.is_validation() => {
            print_client_error(&e);
            anyhow::bail!("Registration failed")
        }
        Err(e) => Err(e).context("Registration failed"),
    }
}

async fn logout(gateway: &AuthGateway, ctx: &AppContext) -> Result<()> {
    if !ctx.store.is_authenticated() {
        println!("{}", "Not logged in.".yellow());
        return Ok(());
    }

    ctx.begin_logout();
    gateway.logout().await?;
    println!("{} Logged out", "✓".green());
    Ok(())
}

async fn whoami(gateway: &AuthGateway, ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard)?;

    let user = gateway.current_user().await?;
    print_user(&user);
    Ok(())
}

fn print_welcome(action: &str, outcome: &AuthOutcome) {
    println!(
        "{} {} as {} ({})",
        "✓".green(),
        action,
        outcome.session.user.username.cyan(),
        outcome.role
    );
    println!("  Next: {}", command_for(outcome.landing).bold());
}
