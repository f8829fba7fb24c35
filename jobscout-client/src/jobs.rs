//! Job-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use jobscout_core::domain::job::{JobFilter, JobListPage, JobRecord, JobStats};
use jobscout_core::dto::job::{JobListQuery, PageQuery, ToggleCheckRequest, ToggleCheckResponse};

impl ApiClient {
    // =============================================================================
    // Job Listing
    // =============================================================================

    /// List jobs matching a filter
    ///
    /// # Arguments
    /// * `filter` - Date window, check state, search text, ordering and page
    ///
    /// # Returns
    /// One page of jobs plus the counters shown above the list
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<JobListPage> {
        let url = format!("{}/api/jobs/list/", self.base_url);
        let query = JobListQuery::from(filter);
        let response = self.send(self.client.get(&url).query(&query)).await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    ///
    /// # Returns
    /// The job details
    pub async fn get_job(&self, job_id: i64) -> Result<JobRecord> {
        let url = format!("{}/api/jobs/detail/{}/", self.base_url, job_id);
        let response = self.send(self.client.get(&url)).await?;

        self.handle_response(response).await
    }

    /// List the jobs the current user has checked
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    pub async fn my_applications(&self, page: u32) -> Result<JobListPage> {
        let url = format!("{}/api/jobs/my-applications/", self.base_url);
        let response = self
            .send(self.client.get(&url).query(&PageQuery { page }))
            .await?;

        self.handle_response(response).await
    }

    /// Get the aggregate job counters
    pub async fn job_stats(&self) -> Result<JobStats> {
        let url = format!("{}/api/jobs/stats/", self.base_url);
        let response = self.send(self.client.get(&url)).await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Mutation
    // =============================================================================

    /// Mark a job as checked or unchecked
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    /// * `is_checked` - The new check state
    /// * `notes` - Free-form notes stored with the check
    pub async fn toggle_check(
        &self,
        job_id: i64,
        is_checked: bool,
        notes: &str,
    ) -> Result<ToggleCheckResponse> {
        let url = format!("{}/api/jobs/toggle-check/", self.base_url);
        let body = ToggleCheckRequest {
            job_id,
            is_checked,
            notes: notes.to_string(),
        };
        let response = self.send(self.client.post(&url).json(&body)).await?;

        self.handle_response(response).await
    }
}
