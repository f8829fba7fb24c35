//! Admin command handlers
//!
//! Dashboard, scraper history, manual scraper runs and a live monitor.
//! Every command here is gated on an admin session.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use jobscout_client::{ClientError, MonitorConfig, OperationalMonitor};
use jobscout_core::domain::route::Route;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::{signal, time};

use super::{AppContext, confirm};
use crate::output::{print_client_error, print_dashboard, print_log_page};

/// How often the live monitor checks that its polling task is alive
const LIVENESS_CHECK: Duration = Duration::from_secs(1);

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Show job counters, scraper state and recent runs
    Status,
    /// Show scraper run history
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Start a scraper run
    Trigger {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Watch the dashboard while the scraper runs
    Monitor,
}

/// Handle admin commands
///
/// # Arguments
/// * `command` - The admin command to execute
/// * `ctx` - Client and session store for this invocation
pub async fn handle_admin_command(command: AdminCommands, ctx: &AppContext) -> Result<()> {
    ctx.require(Route::AdminDashboard)?;

    let monitor = OperationalMonitor::new(
        ctx.client.clone(),
        MonitorConfig {
            poll_interval: ctx.config.poll_interval,
            ..Default::default()
        },
    );

    match command {
        AdminCommands::Status => {
            let snapshot = monitor.refresh().await?;
            print_dashboard(&snapshot);
            Ok(())
        }
        AdminCommands::Logs { page } => {
            let logs = ctx.client.scraper_logs(page.max(1)).await?;
            print_log_page(&logs);
            Ok(())
        }
        AdminCommands::Trigger { yes } => trigger(&monitor, yes).await,
        AdminCommands::Monitor => watch(&monitor).await,
    }
}

/// Start a scraper run after checking it is not already running
async fn trigger(monitor: &OperationalMonitor, yes: bool) -> Result<()> {
    let snapshot = monitor.refresh().await?;
    if snapshot.status.is_running {
        println!("{}", "The scraper is already running.".yellow());
        return Ok(());
    }

    if !yes && !confirm("Start a scraper run now?")? {
        println!("{}", "Cancelled.".dimmed());
        return Ok(());
    }

    Ok(report_trigger(monitor).await?)
}

async fn report_trigger(monitor: &OperationalMonitor) -> jobscout_client::Result<()> {
    match monitor.trigger().await {
        Ok(response) => {
            println!(
                "{} {}",
                "✓".green(),
                response.message.as_deref().unwrap_or("Scraper started")
            );
            if let Some(log_id) = response.log_id {
                println!("  Run: {}", format!("#{}", log_id).dimmed());
            }
            Ok(())
        }
        Err(ClientError::Precondition(e)) => {
            println!("{}", e.to_string().yellow());
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Live dashboard: reprints on every snapshot until Ctrl+C or `q`
///
/// Typing `t` triggers a scraper run, which also resumes polling after the
/// monitor parked on an idle scraper.
async fn watch(monitor: &OperationalMonitor) -> Result<()> {
    let mut updates = monitor.subscribe();
    let handle = monitor.activate();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    println!(
        "{}",
        "Watching the dashboard. Type `t` + Enter to trigger a run, `q` or Ctrl+C to stop."
            .dimmed()
    );

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    println!();
                    print_dashboard(&snapshot);
                    if !snapshot.status.is_running {
                        println!("{}", "Scraper idle, polling paused.".dimmed());
                    }
                }
            }
            line = input.next_line(), if stdin_open => {
                match line?.as_deref().map(str::trim) {
                    Some("q") => break,
                    Some("t") => match report_trigger(monitor).await {
                        Ok(()) => {}
                        Err(e) if e.is_authorization() => return Err(e.into()),
                        Err(e) => print_client_error(&e),
                    },
                    Some(_) => {}
                    None => stdin_open = false,
                }
            }
            _ = &mut ctrl_c => break,
            _ = time::sleep(LIVENESS_CHECK) => {
                if handle.is_finished() {
                    anyhow::bail!("Dashboard monitor stopped");
                }
            }
        }
    }

    handle.stop();
    Ok(())
}
