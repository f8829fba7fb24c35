//! Filtered job list for the job seeker dashboard
//!
//! Every filter change replaces the filter and re-fetches the list. Each
//! fetch is numbered; when responses come back out of order, only the one
//! belonging to the most recently issued fetch is applied.

use std::sync::{Mutex, MutexGuard, PoisonError};

use jobscout_core::domain::job::{CheckStatus, DateFilter, JobFilter, JobListPage};
use tracing::debug;

use crate::ApiClient;
use crate::error::Result;

/// What happened to a fetch's response
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The response was the newest and is now the current list
    Applied(JobListPage),
    /// A newer fetch was issued meanwhile; the response was dropped
    Superseded,
}

impl FetchOutcome {
    pub fn page(&self) -> Option<&JobListPage> {
        match self {
            FetchOutcome::Applied(page) => Some(page),
            FetchOutcome::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    filter: JobFilter,
    current: Option<JobListPage>,
    /// Sequence number of the last fetch issued
    issued: u64,
}

/// Job list driven by a [`JobFilter`]
#[derive(Debug)]
pub struct JobFilterEngine {
    client: ApiClient,
    state: Mutex<EngineState>,
}

impl JobFilterEngine {
    pub fn new(client: ApiClient) -> Self {
        Self::with_filter(client, JobFilter::default())
    }

    pub fn with_filter(client: ApiClient, filter: JobFilter) -> Self {
        Self {
            client,
            state: Mutex::new(EngineState {
                filter,
                ..Default::default()
            }),
        }
    }

    /// Current filter
    pub fn filter(&self) -> JobFilter {
        self.lock().filter.clone()
    }

    /// Latest applied list, if any fetch has succeeded yet
    pub fn current(&self) -> Option<JobListPage> {
        self.lock().current.clone()
    }

    /// Re-fetch with the current filter
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let (seq, filter) = {
            let mut state = self.lock();
            state.issued += 1;
            (state.issued, state.filter.clone())
        };

        debug!(seq, ?filter, "Fetching job list");
        let result = self.client.list_jobs(&filter).await;

        let mut state = self.lock();
        if state.issued != seq {
            debug!(seq, latest = state.issued, "Dropping superseded job list response");
            return Ok(FetchOutcome::Superseded);
        }

        let page = result?;
        state.current = Some(page.clone());
        Ok(FetchOutcome::Applied(page))
    }

    /// Replace the whole filter and re-fetch
    pub async fn set_filter(&self, filter: JobFilter) -> Result<FetchOutcome> {
        self.lock().filter = filter;
        self.refresh().await
    }

    /// Narrowing filters go back to the first page
    pub async fn set_date_filter(&self, date_filter: DateFilter) -> Result<FetchOutcome> {
        self.update(|filter| {
            filter.date_filter = date_filter;
            filter.page = None;
        })
        .await
    }

    pub async fn set_check_status(&self, check_status: CheckStatus) -> Result<FetchOutcome> {
        self.update(|filter| {
            filter.check_status = check_status;
            filter.page = None;
        })
        .await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> Result<FetchOutcome> {
        let search = search.into();
        self.update(|filter| {
            filter.search = search;
            filter.page = None;
        })
        .await
    }

    pub async fn set_ordering(&self, ordering: Option<String>) -> Result<FetchOutcome> {
        self.update(|filter| filter.ordering = ordering).await
    }

    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome> {
        self.update(|filter| filter.page = Some(page.max(1))).await
    }

    /// Set a job's check state, then re-fetch the whole list
    ///
    /// The local list is never patched; the re-fetch is the source of
    /// truth for the new state.
    pub async fn toggle_check(
        &self,
        job_id: i64,
        is_checked: bool,
        notes: &str,
    ) -> Result<FetchOutcome> {
        debug!(job_id, is_checked, "Toggling job check state");
        self.client.toggle_check(job_id, is_checked, notes).await?;
        self.refresh().await
    }

    async fn update(&self, change: impl FnOnce(&mut JobFilter)) -> Result<FetchOutcome> {
        change(&mut self.lock().filter);
        self.refresh().await
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
