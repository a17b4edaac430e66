use serde::Serialize;

use crate::db::models::JobRow;

/// Response wrapping a single job record
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

/// Response for the list endpoint, with pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub total_jobs: i64,
    pub num_of_pages: i64,
}

/// Per-status counts with every known status present
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DefaultStats {
    pub pending: i64,
    pub interview: i64,
    pub declined: i64,
}

/// Applications submitted in one calendar month, e.g. `{"date": "Jun 2023", "count": 7}`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub date: String,
    pub count: i64,
}

/// Response for the stats endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub default_stats: DefaultStats,
    pub monthly_applications: Vec<MonthlyCount>,
}
