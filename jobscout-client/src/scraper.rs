//! Scraper administration endpoints (admin only)

use crate::ApiClient;
use crate::error::Result;
use jobscout_core::domain::scraper::{ScraperLogPage, ScraperStatus};
use jobscout_core::dto::job::PageQuery;
use jobscout_core::dto::scraper::{TriggerScraperRequest, TriggerScraperResponse};

impl ApiClient {
    // =============================================================================
    // Scraper Control
    // =============================================================================

    /// Ask the server to start a scraper run
    ///
    /// Prefer [`crate::OperationalMonitor::trigger`], which refuses to send
    /// a second trigger while one is in flight or a run is active.
    pub async fn trigger_scraper(&self) -> Result<TriggerScraperResponse> {
        let url = format!("{}/api/jobs/trigger-scraper/", self.base_url);
        let response = self
            .send(self.client.post(&url).json(&TriggerScraperRequest::default()))
            .await?;

        self.handle_response(response).await
    }

    /// Get the current scraper state
    pub async fn scraper_status(&self) -> Result<ScraperStatus> {
        let url = format!("{}/api/jobs/scraper-status/", self.base_url);
        let response = self.send(self.client.get(&url)).await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Scraper History
    // =============================================================================

    /// Get a page of scraper run history
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    pub async fn scraper_logs(&self, page: u32) -> Result<ScraperLogPage> {
        let url = format!("{}/api/jobs/scraper-logs/", self.base_url);
        let response = self
            .send(self.client.get(&url).query(&PageQuery { page }))
            .await?;

        self.handle_response(response).await
    }
}
