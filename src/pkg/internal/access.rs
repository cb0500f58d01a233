//! Ownership rules: callers only ever reach jobs they created.

use uuid::Uuid;

use crate::{
    pkg::internal::{
        adaptors::jobs::spec::{JobEntry, JobFilter},
        auth::Caller,
    },
    prelude::{ApiError, Result},
};

impl Caller {
    /// Filter for every job the caller owns.
    pub fn scope(&self) -> JobFilter {
        JobFilter {
            id: None,
            created_by: Some(self.user_id.clone()),
        }
    }

    /// Filter for one job, restricted to the caller.
    pub fn scope_job(&self, id: Uuid) -> JobFilter {
        JobFilter {
            id: Some(id),
            created_by: Some(self.user_id.clone()),
        }
    }
}

/// Pins `filter` to the caller. A filter naming another owner is refused.
pub fn authorize(caller: &Caller, mut filter: JobFilter) -> Result<JobFilter> {
    match filter.created_by.as_deref() {
        Some(owner) if owner != caller.user_id => {
            tracing::warn!("{} attempted to reach jobs of {}", &caller.user_id, owner);
            Err(match filter.id {
                Some(id) => ApiError::job_not_found(id),
                None => ApiError::NotFound("No jobs found".into()),
            })
        }
        Some(_) => Ok(filter),
        None => {
            filter.created_by = Some(caller.user_id.clone());
            Ok(filter)
        }
    }
}

/// Rejects a record that does not belong to the caller.
pub fn ensure_owned(caller: &Caller, job: JobEntry) -> Result<JobEntry> {
    if job.created_by == caller.user_id {
        Ok(job)
    } else {
        tracing::error!("job {} leaked past owner scope for {}", job.id, &caller.user_id);
        Err(ApiError::job_not_found(job.id))
    }
}
