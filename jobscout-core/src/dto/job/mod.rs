//! Job DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobFilter, JobRecord};

/// Query string of `/jobs/list/`
///
/// Empty values are left out of the query rather than sent blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl From<&JobFilter> for JobListQuery {
    fn from(filter: &JobFilter) -> Self {
        let search = filter.search.trim();
        Self {
            date_filter: Some(filter.date_filter.as_str().to_string()),
            check_status: Some(filter.check_status.as_str().to_string()),
            search: (!search.is_empty()).then(|| search.to_string()),
            ordering: filter
                .ordering
                .as_ref()
                .filter(|ordering| !ordering.is_empty())
                .cloned(),
            page: filter.page,
        }
    }
}

/// Query string of the paginated endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
}

/// Body of `/jobs/toggle-check/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleCheckRequest {
    pub job_id: i64,
    pub is_checked: bool,
    #[serde(default)]
    pub notes: String,
}

/// Response of `/jobs/toggle-check/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleCheckResponse {
    pub message: Option<String>,
    pub job: Option<JobRecord>,
}
