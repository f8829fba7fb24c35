//! Job domain types

use serde::{Deserialize, Serialize};

/// A job link found by the scraper
///
/// Only `is_checked` ever changes on the client's behalf, and only through
/// the toggle-check endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub link: String,
    pub date_found: String,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Date window applied to the job list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Yesterday,
    LastWeek,
}

impl DateFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            DateFilter::All => "all",
            DateFilter::Today => "today",
            DateFilter::Yesterday => "yesterday",
            DateFilter::LastWeek => "last_week",
        }
    }
}

impl std::str::FromStr for DateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateFilter::All),
            "today" => Ok(DateFilter::Today),
            "yesterday" => Ok(DateFilter::Yesterday),
            "last_week" | "last-week" => Ok(DateFilter::LastWeek),
            other => Err(format!(
                "unknown date filter '{}' (expected all, today, yesterday or last_week)",
                other
            )),
        }
    }
}

/// Check-state filter applied to the job list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    #[default]
    All,
    Checked,
    Unchecked,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::All => "all",
            CheckStatus::Checked => "checked",
            CheckStatus::Unchecked => "unchecked",
        }
    }
}

impl std::str::FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CheckStatus::All),
            "checked" => Ok(CheckStatus::Checked),
            "unchecked" => Ok(CheckStatus::Unchecked),
            other => Err(format!(
                "unknown check status '{}' (expected all, checked or unchecked)",
                other
            )),
        }
    }
}

/// Filter driving the job seeker's list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    pub date_filter: DateFilter,
    pub check_status: CheckStatus,
    pub search: String,
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

/// Counters returned alongside a job list page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListStats {
    pub total: u64,
    pub today: u64,
    pub yesterday: u64,
    pub checked: u64,
    pub unchecked: u64,
}

/// One page of the filtered job list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListPage {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<JobRecord>,
    pub stats: Option<JobListStats>,
}

/// Aggregate counters from `/jobs/stats/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobStats {
    pub overview: StatsOverview,
    pub today: DayStats,
    pub yesterday: DayStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOverview {
    pub total_jobs: u64,
    pub total_checked: u64,
    pub total_unchecked: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayStats {
    pub total: u64,
    pub checked: Option<u64>,
    pub unchecked: Option<u64>,
}
