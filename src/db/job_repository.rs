use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::models::{CreateJob, ListQuery, SortKey, UpdateJob};
use crate::db::models::{JobRow, MonthCountRow, StatusCountRow};

const JOB_COLUMNS: &str = "id, created_by, company, position, status, job_type, created_at, updated_at";

/// Repository for job application database operations
///
/// Every statement here is constrained by the owning user; no query can
/// see or touch another user's rows.
pub struct JobRepository;

impl JobRepository {
    /// Insert a new job owned by `user_id` and return the full row
    pub async fn insert(
        pool: &Pool<Postgres>,
        user_id: i32,
        job: &CreateJob,
    ) -> Result<JobRow, sqlx::Error> {
        debug!(
            "Creating job: owner={}, company={}, position={}",
            user_id, job.company, job.position
        );

        sqlx::query_as::<_, JobRow>(&format!(
            "INSERT INTO jobs (created_by, company, position, status, job_type) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {JOB_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status.as_str())
        .bind(job.job_type.as_str())
        .fetch_one(pool)
        .await
    }

    /// Fetch one page of the caller's jobs, honoring filters and sort
    pub async fn find_page(
        pool: &Pool<Postgres>,
        user_id: i32,
        query: &ListQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        let mut qb = filtered_query(&format!("SELECT {JOB_COLUMNS} FROM jobs"), user_id, query);
        if let Some(clause) = order_clause(query.sort_key()) {
            qb.push(clause);
        }
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);

        qb.build_query_as::<JobRow>().fetch_all(pool).await
    }

    /// Count all of the caller's jobs matching the filters, ignoring pagination
    pub async fn count(
        pool: &Pool<Postgres>,
        user_id: i32,
        query: &ListQuery,
    ) -> Result<i64, sqlx::Error> {
        filtered_query("SELECT COUNT(*) FROM jobs", user_id, query)
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await
    }

    /// Fetch a single job by (id, owner); `None` when no such pair exists
    pub async fn find_one(
        pool: &Pool<Postgres>,
        id: i32,
        user_id: i32,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND created_by = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Apply a partial update to (id, owner) and return the post-update row
    ///
    /// Only the supplied fields are written; `updated_at` is always
    /// refreshed. `None` when no row matched.
    pub async fn update(
        pool: &Pool<Postgres>,
        id: i32,
        user_id: i32,
        changes: &UpdateJob,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        debug!("Updating job: id={}, owner={}", id, user_id);

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE jobs SET updated_at = NOW()");
        if let Some(company) = &changes.company {
            qb.push(", company = ").push_bind(company.clone());
        }
        if let Some(position) = &changes.position {
            qb.push(", position = ").push_bind(position.clone());
        }
        if let Some(status) = changes.status {
            qb.push(", status = ").push_bind(status.as_str());
        }
        if let Some(job_type) = changes.job_type {
            qb.push(", job_type = ").push_bind(job_type.as_str());
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" AND created_by = ").push_bind(user_id);
        qb.push(format!(" RETURNING {JOB_COLUMNS}"));

        qb.build_query_as::<JobRow>().fetch_optional(pool).await
    }

    /// Delete (id, owner); returns the deleted id, `None` when no row matched
    pub async fn delete(
        pool: &Pool<Postgres>,
        id: i32,
        user_id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        debug!("Deleting job: id={}, owner={}", id, user_id);

        sqlx::query_scalar::<_, i32>(
            "DELETE FROM jobs WHERE id = $1 AND created_by = $2 RETURNING id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Group the caller's jobs by status
    pub async fn count_by_status(
        pool: &Pool<Postgres>,
        user_id: i32,
    ) -> Result<Vec<StatusCountRow>, sqlx::Error> {
        sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count FROM jobs WHERE created_by = $1 GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Group the caller's jobs by creation month, most recent first,
    /// capped at `months` groups
    pub async fn count_by_month(
        pool: &Pool<Postgres>,
        user_id: i32,
        months: i64,
    ) -> Result<Vec<MonthCountRow>, sqlx::Error> {
        sqlx::query_as::<_, MonthCountRow>(
            "SELECT EXTRACT(YEAR FROM created_at)::INT AS year, \
                    EXTRACT(MONTH FROM created_at)::INT AS month, \
                    COUNT(*) AS count \
             FROM jobs WHERE created_by = $1 \
             GROUP BY year, month \
             ORDER BY year DESC, month DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(months)
        .fetch_all(pool)
        .await
    }
}

/// Start from the mandatory owner constraint and conditionally add one
/// predicate per recognized parameter.
fn filtered_query(
    select: &str,
    user_id: i32,
    query: &ListQuery,
) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(select);
    qb.push(" WHERE created_by = ").push_bind(user_id);

    if let Some(search) = query.search_term() {
        qb.push(" AND position ILIKE ")
            .push_bind(format!("%{}%", search));
    }
    if let Some(status) = query.status_filter() {
        qb.push(" AND status = ").push_bind(status.to_owned());
    }
    if let Some(job_type) = query.job_type_filter() {
        qb.push(" AND job_type = ").push_bind(job_type.to_owned());
    }

    qb
}

fn order_clause(sort: Option<SortKey>) -> Option<&'static str> {
    match sort? {
        SortKey::Latest => Some(" ORDER BY created_at DESC"),
        SortKey::Oldest => Some(" ORDER BY created_at ASC"),
        SortKey::AZ => Some(" ORDER BY position ASC"),
        SortKey::ZA => Some(" ORDER BY position DESC"),
    }
}
