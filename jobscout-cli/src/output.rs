//! Terminal rendering of API objects

use chrono::{DateTime, Local, Utc};
use colored::*;
use jobscout_client::{ClientError, DashboardSnapshot};
use jobscout_core::domain::job::{JobListPage, JobListStats, JobRecord, JobStats};
use jobscout_core::domain::scraper::{
    ScraperLogEntry, ScraperLogPage, ScraperRunStatus, ScraperStatus,
};
use jobscout_core::domain::user::User;

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Print a user profile
pub fn print_user(user: &User) {
    println!("{}", "Account:".bold());
    println!("  Username: {}", user.username.cyan());
    println!("  Name:     {}", user.display_name());
    println!("  Role:     {}", user.role);
    if let Some(email) = &user.email {
        println!("  Email:    {}", email);
    }
    if let Some(phone) = user.phone.as_deref().filter(|phone| !phone.is_empty()) {
        println!("  Phone:    {}", phone);
    }
}

/// Print a one-line job summary
pub fn print_job_summary(job: &JobRecord) {
    println!(
        "  {} {} {} {}",
        "▸".cyan(),
        format!("#{}", job.id).dimmed(),
        checked_marker(job.is_checked),
        job.link
    );
    println!("      Found: {}", job.date_found.dimmed());
}

/// Print detailed job information
pub fn print_job_details(job: &JobRecord) {
    println!("{}", "Job Details:".bold());
    println!("  ID:       {}", job.id.to_string().cyan());
    println!("  Link:     {}", job.link);
    println!("  Found:    {}", job.date_found);
    println!("  Checked:  {}", checked_marker(job.is_checked));

    if let Some(query) = &job.search_query {
        println!("  Query:    {}", query);
    }
    if let Some(video) = &job.video_url {
        println!("  Video:    {}", video.dimmed());
    }
    if let Some(notes) = job.notes.as_deref().filter(|notes| !notes.is_empty()) {
        println!("\n{}", "Notes:".bold());
        println!("  {}", notes);
    }
}

/// Print a page of jobs with its counters
pub fn print_job_page(page: &JobListPage, current_page: u32) {
    if let Some(stats) = &page.stats {
        print_list_stats(stats);
        println!();
    }

    if page.results.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return;
    }

    let total = page.count.unwrap_or(page.results.len() as u64);
    println!("{}", format!("Found {} job(s):", total).bold());
    println!();
    for job in &page.results {
        print_job_summary(job);
    }

    if let Some(hint) = paging_hint(page, current_page) {
        println!();
        println!("{}", hint.dimmed());
    }
}

fn print_list_stats(stats: &JobListStats) {
    println!(
        "Total: {}  Today: {}  Yesterday: {}  Checked: {}  Unchecked: {}",
        stats.total.to_string().bold(),
        stats.today,
        stats.yesterday,
        stats.checked.to_string().green(),
        stats.unchecked.to_string().yellow()
    );
}

/// Print the aggregate counters
pub fn print_job_stats(stats: &JobStats) {
    let overview = &stats.overview;
    let unchecked = overview
        .total_unchecked
        .unwrap_or(overview.total_jobs.saturating_sub(overview.total_checked));

    println!("{}", "Job Statistics:".bold());
    println!("  Total:      {}", overview.total_jobs.to_string().bold());
    println!("  Checked:    {}", overview.total_checked.to_string().green());
    println!("  Unchecked:  {}", unchecked.to_string().yellow());
    println!("  Today:      {}", stats.today.total);
    println!("  Yesterday:  {}", stats.yesterday.total);
}

/// Print the scraper state
pub fn print_scraper_status(status: &ScraperStatus) {
    let state = if status.is_running {
        "Running".cyan().bold()
    } else {
        "Idle".green()
    };
    println!("{}", "Scraper:".bold());
    println!("  State:     {}", state);

    if let Some(run) = &status.last_run {
        println!("  Started:   {}", format_timestamp(run.started_at));
        if let Some(completed) = run.completed_at {
            println!("  Completed: {}", format_timestamp(completed));
            let seconds = completed.signed_duration_since(run.started_at).num_seconds();
            println!("  Duration:  {}s", seconds);
        }
        if let Some(status) = run.status {
            println!("  Result:    {}", colorize_run_status(status));
        }
    } else {
        println!("  {}", "The scraper has not run yet.".dimmed());
    }
}

/// Print a page of scraper runs
pub fn print_log_page(page: &ScraperLogPage) {
    if page.logs.is_empty() {
        println!("{}", "No scraper runs recorded.".yellow());
        return;
    }

    println!("{}", "Scraper Runs:".bold());
    println!("{}", "─".repeat(80).dimmed());
    for entry in &page.logs {
        print_log_entry(entry);
    }
    println!("{}", "─".repeat(80).dimmed());

    if let (Some(current), Some(total)) = (page.current_page, page.total_pages) {
        println!("{}", format!("Page {} of {}", current, total).dimmed());
    }
}

fn print_log_entry(entry: &ScraperLogEntry) {
    println!(
        "{} {} [{}] videos: {}  links: {}  new: {}  by {}",
        format!("#{}", entry.id).dimmed(),
        format_timestamp(entry.started_at),
        colorize_run_status(entry.status),
        entry.videos_scraped,
        entry.links_found,
        entry.new_links.to_string().green(),
        entry.trigger_label()
    );
}

/// Print the whole admin dashboard
pub fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!(
        "{}",
        format!("Dashboard at {}", format_timestamp(snapshot.fetched_at)).bold()
    );
    println!();
    print_job_stats(&snapshot.stats);
    println!();
    print_scraper_status(&snapshot.status);
    println!();
    print_log_page(&snapshot.logs);
}

/// Print form errors field by field, or the general message
pub fn print_client_error(error: &ClientError) {
    match error.field_errors().filter(|errors| !errors.is_empty()) {
        Some(errors) => {
            eprintln!("{}", "The server rejected the request:".red().bold());
            for (field, messages) in errors.iter() {
                for message in messages {
                    eprintln!("  {} {}", format!("{}:", field).yellow(), message);
                }
            }
        }
        None => eprintln!("{} {}", "Error:".red().bold(), error),
    }
}

fn checked_marker(is_checked: bool) -> ColoredString {
    if is_checked { "✓".green() } else { "○".dimmed() }
}

/// Colorize scraper run status for display
fn colorize_run_status(status: ScraperRunStatus) -> ColoredString {
    let status_str = format!("{:?}", status);
    match status {
        ScraperRunStatus::Running => status_str.cyan(),
        ScraperRunStatus::Completed => status_str.green(),
        ScraperRunStatus::Failed => status_str.red(),
    }
}

/// Where to go next in a paginated list
fn paging_hint(page: &JobListPage, current_page: u32) -> Option<String> {
    match (page.previous.is_some(), page.next.is_some()) {
        (false, false) => None,
        (true, false) => Some(format!(
            "Page {}. Previous: --page {}",
            current_page,
            current_page.saturating_sub(1)
        )),
        (false, true) => Some(format!(
            "Page {}. Next: --page {}",
            current_page,
            current_page.saturating_add(1)
        )),
        (true, true) => Some(format!(
            "Page {}. Previous: --page {}, next: --page {}",
            current_page,
            current_page.saturating_sub(1),
            current_page.saturating_add(1)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(previous: bool, next: bool) -> JobListPage {
        JobListPage {
            previous: previous.then(|| "prev".to_string()),
            next: next.then(|| "next".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_paging_hint_on_last_page_number() {
        assert_eq!(
            paging_hint(&page(true, true), u32::MAX).as_deref(),
            Some("Page 4294967295. Previous: --page 4294967294, next: --page 4294967295")
        );
    }

    #[test]
    fn test_single_page_has_no_hint() {
        assert_eq!(paging_hint(&page(false, false), 1), None);
    }

    #[test]
    fn test_paging_hint_points_both_ways() {
        assert_eq!(
            paging_hint(&page(false, true), 1).as_deref(),
            Some("Page 1. Next: --page 2")
        );
        assert_eq!(
            paging_hint(&page(true, true), 3).as_deref(),
            Some("Page 3. Previous: --page 2, next: --page 4")
        );
        assert_eq!(
            paging_hint(&page(true, false), 4).as_deref(),
            Some("Page 4. Previous: --page 3")
        );
    }
}
