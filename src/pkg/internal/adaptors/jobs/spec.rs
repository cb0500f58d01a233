use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Interview,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job about to be stored. The owner is never taken from the client.
#[derive(Debug, Clone, Validate)]
pub struct NewJob {
    #[validate(length(min = 1, max = 50, message = "Please provide company (at most 50 characters)"))]
    pub company: String,
    #[validate(length(min = 1, max = 100, message = "Please provide position (at most 100 characters)"))]
    pub position: String,
    pub status: JobStatus,
    pub created_by: String,
}

/// Fields an update may touch. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Validate)]
pub struct JobPatch {
    #[validate(length(min = 1, max = 50, message = "Please provide company (at most 50 characters)"))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Please provide position (at most 100 characters)"))]
    pub position: Option<String>,
    pub status: Option<JobStatus>,
}

/// Match criteria understood by every repository. Empty fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub id: Option<Uuid>,
    pub created_by: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobEntry) -> bool {
        self.id.is_none_or(|id| id == job.id)
            && self
                .created_by
                .as_deref()
                .is_none_or(|owner| owner == job.created_by)
    }
}
