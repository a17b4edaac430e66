use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a job application currently stands
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Interview,
    Declined,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Interview => "interview",
            JobStatus::Declined => "declined",
        }
    }
}

/// Employment type of the posting
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Other,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
            JobType::Other => "other",
        }
    }
}

/// Body for creating a job application
///
/// The owner is never taken from the body; it always comes from the
/// authenticated caller. Unknown fields (including any owner-like field)
/// are ignored by deserialization.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Company must be between 1 and 50 characters"
    ))]
    pub company: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Position must be between 1 and 100 characters"
    ))]
    pub position: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub job_type: JobType,
}

/// Body for a partial update; only supplied fields change
///
/// Only upper bounds are validated here; explicit empty strings are
/// rejected by the service with the fixed BadRequest message.
#[derive(Debug, Deserialize, Serialize, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJob {
    #[validate(length(max = 50, message = "Company must be at most 50 characters"))]
    pub company: Option<String>,
    #[validate(length(max = 100, message = "Position must be at most 100 characters"))]
    pub position: Option<String>,
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
}

/// Recognized list-endpoint sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Latest,
    Oldest,
    AZ,
    ZA,
}

impl SortKey {
    /// Unrecognized values fall back to storage-default order.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(SortKey::Latest),
            "oldest" => Some(SortKey::Oldest),
            "a-z" => Some(SortKey::AZ),
            "z-a" => Some(SortKey::ZA),
            _ => None,
        }
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub job_type: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Free-text search term, if one was supplied and non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Status filter; `all` is the no-filter sentinel.
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| *s != "all")
    }

    /// Job-type filter; `all` is the no-filter sentinel.
    pub fn job_type_filter(&self) -> Option<&str> {
        self.job_type.as_deref().filter(|s| *s != "all")
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort.as_deref().and_then(SortKey::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Interview).unwrap(),
            "\"interview\""
        );
        assert_eq!(JobStatus::default(), JobStatus::Pending);
    }

    #[test]
    fn job_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            "\"full-time\""
        );
        assert_eq!(JobType::PartTime.as_str(), "part-time");
    }

    #[test]
    fn create_body_defaults_status_and_type() {
        let job: CreateJob =
            serde_json::from_str(r#"{"company":"Acme","position":"Engineer"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.job_type, JobType::FullTime);
    }

    #[test]
    fn create_body_ignores_owner_field() {
        let job: CreateJob = serde_json::from_str(
            r#"{"company":"Acme","position":"Engineer","createdBy":999}"#,
        )
        .unwrap();
        assert_eq!(job.company, "Acme");
    }

    #[test]
    fn update_body_validates_upper_bounds_only() {
        let over_length = UpdateJob {
            company: Some("x".repeat(51)),
            ..UpdateJob::default()
        };
        assert!(over_length.validate().is_err());

        // Empty strings pass here; the service rejects them with its own
        // fixed message before any storage attempt.
        let empty = UpdateJob {
            company: Some(String::new()),
            ..UpdateJob::default()
        };
        assert!(empty.validate().is_ok());
        assert!(UpdateJob::default().validate().is_ok());
    }

    #[test]
    fn sort_key_parses_known_values_only() {
        assert_eq!(SortKey::parse("latest"), Some(SortKey::Latest));
        assert_eq!(SortKey::parse("oldest"), Some(SortKey::Oldest));
        assert_eq!(SortKey::parse("a-z"), Some(SortKey::AZ));
        assert_eq!(SortKey::parse("z-a"), Some(SortKey::ZA));
        assert_eq!(SortKey::parse("newest"), None);
    }

    #[test]
    fn list_query_parses_camel_case_params() {
        let q = Query::<ListQuery>::from_query(
            "search=dev&status=pending&jobType=full-time&sort=a-z&page=2&limit=5",
        )
        .unwrap();
        assert_eq!(q.search_term(), Some("dev"));
        assert_eq!(q.status_filter(), Some("pending"));
        assert_eq!(q.job_type_filter(), Some("full-time"));
        assert_eq!(q.sort_key(), Some(SortKey::AZ));
        assert_eq!(q.page, Some(2));
        assert_eq!(q.limit, Some(5));
    }

    #[test]
    fn list_query_treats_all_as_no_filter() {
        let q = Query::<ListQuery>::from_query("status=all&jobType=all&search=").unwrap();
        assert_eq!(q.status_filter(), None);
        assert_eq!(q.job_type_filter(), None);
        assert_eq!(q.search_term(), None);
        assert_eq!(q.sort_key(), None);
    }
}
