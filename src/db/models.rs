use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job application with all fields
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub created_by: i32,
    pub company: String,
    pub position: String,
    pub status: String,
    pub job_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One group from the per-status aggregation
#[derive(Debug, FromRow)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

/// One group from the per-month aggregation, most recent first
#[derive(Debug, FromRow)]
pub struct MonthCountRow {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}
