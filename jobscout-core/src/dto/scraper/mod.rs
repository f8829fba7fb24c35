//! Scraper DTOs

use serde::{Deserialize, Serialize};

/// Body of `/jobs/trigger-scraper/`
///
/// The endpoint takes no parameters today; an empty object is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerScraperRequest {}

/// Response of `/jobs/trigger-scraper/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerScraperResponse {
    pub message: Option<String>,
    pub log_id: Option<i64>,
}
