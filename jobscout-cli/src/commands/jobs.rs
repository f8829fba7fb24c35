//! Job command handlers
//!
//! Handles the job seeker commands: listing with filters, viewing details,
//! checking jobs off and looking at counters.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use jobscout_client::{FetchOutcome, JobFilterEngine};
use jobscout_core::domain::job::{CheckStatus, DateFilter, JobFilter};
use jobscout_core::domain::route::Route;

use super::AppContext;
use crate::output::{print_job_details, print_job_page, print_job_stats};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobsCommands {
    /// List jobs
    List {
        /// Date window: all, today, yesterday or last_week
        #[arg(long, default_value = "all")]
        date: DateFilter,

        /// Check state: all, checked or unchecked
        #[arg(long, default_value = "all")]
        status: CheckStatus,

        /// Free text search
        #[arg(long, default_value = "")]
        search: String,

        /// Server-side ordering, e.g. -date_found
        #[arg(long)]
        ordering: Option<String>,

        #[arg(long)]
        page: Option<u32>,
    },
    /// Get job details
    Show { id: i64 },
    /// Mark a job as checked, then show the refreshed list
    Check {
        id: i64,

        /// Notes stored with the check
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Mark a job as not checked, then show the refreshed list
    Uncheck { id: i64 },
    /// Show job counters
    Stats,
    /// List the jobs you have checked
    Applications {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

/// Handle job commands
///
/// Every job command needs a signed-in account of any role.
///
/// # Arguments
/// * `command` - The job command to execute
/// * `ctx` - Client and session store for this invocation
pub async fn handle_jobs_command(command: JobsCommands, ctx: &AppContext) -> Result<()> {
    ctx.require(Route::Dashboard)?;

    match command {
        JobsCommands::List {
            date,
            status,
            search,
            ordering,
            page,
        } => {
            let filter = JobFilter {
                date_filter: date,
                check_status: status,
                search,
                ordering,
                page: page.map(|page| page.max(1)),
            };
            list_jobs(ctx, filter).await
        }
        JobsCommands::Show { id } => show_job(ctx, id).await,
        JobsCommands::Check { id, notes } => set_checked(ctx, id, true, &notes).await.map(drop),
        JobsCommands::Uncheck { id } => set_checked(ctx, id, false, "").await.map(drop),
        JobsCommands::Stats => {
            let stats = ctx.client.job_stats().await?;
            print_job_stats(&stats);
            Ok(())
        }
        JobsCommands::Applications { page } => {
            let page_number = page.max(1);
            let page = ctx.client.my_applications(page_number).await?;
            print_job_page(&page, page_number);
            Ok(())
        }
    }
}

/// List jobs matching a filter
async fn list_jobs(ctx: &AppContext, filter: JobFilter) -> Result<()> {
    let current_page = filter.page.unwrap_or(1);
    let engine = JobFilterEngine::with_filter(ctx.client.clone(), filter);

    match engine.refresh().await? {
        FetchOutcome::Applied(page) => print_job_page(&page, current_page),
        FetchOutcome::Superseded => println!("{}", "Job list changed, try again.".yellow()),
    }
    Ok(())
}

/// Get and display a single job
async fn show_job(ctx: &AppContext, id: i64) -> Result<()> {
    match ctx.client.get_job(id).await {
        Ok(job) => {
            print_job_details(&job);
            Ok(())
        }
        Err(e) if e.is_not_found() => anyhow::bail!("Job #{} not found", id),
        Err(e) => Err(e.into()),
    }
}

/// Change a job's check state and show the list as the server now has it
async fn set_checked(
    ctx: &AppContext,
    id: i64,
    is_checked: bool,
    notes: &str,
) -> Result<FetchOutcome> {
    let engine = JobFilterEngine::new(ctx.client.clone());
    let outcome = match engine.toggle_check(id, is_checked, notes).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_not_found() => anyhow::bail!("Job #{} not found", id),
        Err(e) => return Err(e.into()),
    };

    let action = if is_checked { "checked" } else { "unchecked" };
    println!("{} Job #{} marked as {}", "✓".green(), id, action);
    if let Some(page) = outcome.page() {
        println!();
        print_job_page(page, 1);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use jobscout_client::SessionStore;
    use jobscout_core::domain::session::Session;
    use jobscout_core::domain::user::{Role, User};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIST: &str = "/api/jobs/list/";
    const TOGGLE: &str = "/api/jobs/toggle-check/";

    fn logged_in(server: &MockServer, dir: &TempDir) -> AppContext {
        let config = Config::new(server.uri(), dir.path().join("session.json"));
        let ctx = AppContext::build(&config).unwrap();
        let user = User {
            id: 1,
            username: "alice".to_string(),
            role: Role::JobSeeker,
            email: None,
            first_name: None,
            last_name: None,
            phone: None,
        };
        ctx.store
            .save(&Session::new("A", "R", user).unwrap())
            .unwrap();
        ctx
    }

    async fn list_hits(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == LIST)
            .count()
    }

    #[tokio::test]
    async fn test_check_refetches_job_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOGGLE))
            .and(body_json(json!({ "job_id": 4, "is_checked": true, "notes": "applied" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(LIST))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{
                    "id": 4,
                    "link": "https://example.com/jobs/4",
                    "date_found": "2024-05-01",
                    "is_checked": true
                }]
            })))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = logged_in(&server, &dir);

        let outcome = set_checked(&ctx, 4, true, "applied").await.unwrap();
        let page = outcome.page().unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.results[0].is_checked);
        assert_eq!(list_hits(&server).await, 1);
    }

    #[tokio::test]
    async fn test_check_unknown_job_skips_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOGGLE))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Job not found" })),
            )
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let ctx = logged_in(&server, &dir);

        let err = set_checked(&ctx, 99, false, "").await.unwrap_err();
        assert_eq!(err.to_string(), "Job #99 not found");
        assert_eq!(list_hits(&server).await, 0);
    }
}
