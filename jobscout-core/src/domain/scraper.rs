//! Scraper domain types
//!
//! The scraper runs server-side; the client only observes its state and
//! asks for new runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current state of the scraper as reported by `/jobs/scraper-status/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScraperStatus {
    #[serde(default)]
    pub is_running: bool,
    /// The latest (or current) run, if the scraper has ever run
    #[serde(default, rename = "scraper", alias = "last_run")]
    pub last_run: Option<ScraperRun>,
}

/// Summary of a scraper run embedded in the status response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperRun {
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<ScraperRunStatus>,
}

/// Lifecycle of a scraper run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScraperRunStatus {
    Running,
    Completed,
    Failed,
}

/// One row of the scraper run history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperLogEntry {
    pub id: i64,
    pub started_at: DateTime<Utc>,
    pub status: ScraperRunStatus,
    #[serde(default, rename = "total_videos_scraped")]
    pub videos_scraped: u64,
    #[serde(default, rename = "total_links_found")]
    pub links_found: u64,
    #[serde(default, rename = "new_links_added")]
    pub new_links: u64,
    /// Username of the admin who started the run; absent for automated runs
    #[serde(default, rename = "triggered_by_username")]
    pub triggered_by: Option<String>,
}

impl ScraperLogEntry {
    pub fn trigger_label(&self) -> &str {
        self.triggered_by.as_deref().unwrap_or("Automated")
    }
}

/// A page of scraper run history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperLogPage {
    pub logs: Vec<ScraperLogEntry>,
    pub count: Option<u64>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
}
