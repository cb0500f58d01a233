use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    pkg::internal::{
        access::{authorize, ensure_owned},
        adaptors::jobs::{
            JobRepository,
            spec::{JobEntry, JobPatch, JobStatus, NewJob},
        },
        auth::Caller,
    },
    prelude::{ApiError, Result},
};

/// Everything an operation gets to see about a request.
#[derive(Debug, Clone)]
pub struct JobRequest<P = ()> {
    pub caller: Arc<Caller>,
    pub job_id: Option<String>,
    pub payload: P,
}

impl JobRequest {
    pub fn new(caller: Arc<Caller>) -> Self {
        JobRequest {
            caller,
            job_id: None,
            payload: (),
        }
    }
}

impl<P> JobRequest<P> {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.job_id = Some(id.into());
        self
    }

    pub fn with_payload<Q>(self, payload: Q) -> JobRequest<Q> {
        JobRequest {
            caller: self.caller,
            job_id: self.job_id,
            payload,
        }
    }

    /// Path ids that are not UUIDs cannot name a stored job.
    fn parsed_id(&self) -> Result<Uuid> {
        let raw = self.job_id.as_deref().unwrap_or_default();
        raw.parse::<Uuid>()
            .map_err(|_| ApiError::job_not_found(raw))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    pub status: Option<JobStatus>,
    /// Ignored; the owner is always the caller.
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJobInput {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Serialize)]
pub struct JobList {
    pub jobs: Vec<JobEntry>,
    pub count: usize,
}

pub async fn list(repo: &dyn JobRepository, req: JobRequest) -> Result<JobList> {
    let filter = authorize(&req.caller, req.caller.scope())?;
    let jobs = repo
        .find(&filter)
        .await?
        .into_iter()
        .map(|job| ensure_owned(&req.caller, job))
        .collect::<Result<Vec<_>>>()?;
    Ok(JobList {
        count: jobs.len(),
        jobs,
    })
}

pub async fn get(repo: &dyn JobRepository, req: JobRequest) -> Result<JobEntry> {
    let id = req.parsed_id()?;
    let filter = authorize(&req.caller, req.caller.scope_job(id))?;
    match repo.find_one(&filter).await? {
        Some(job) => ensure_owned(&req.caller, job),
        None => Err(ApiError::job_not_found(id)),
    }
}

pub async fn create(
    repo: &dyn JobRepository,
    req: JobRequest<CreateJobInput>,
) -> Result<JobEntry> {
    let input = req.payload;
    if let Some(claimed) = input.created_by.as_deref() {
        if claimed != req.caller.user_id {
            tracing::debug!("ignoring client supplied owner {}", claimed);
        }
    }
    let job = repo
        .insert(NewJob {
            company: input.company,
            position: input.position,
            status: input.status.unwrap_or_default(),
            created_by: req.caller.user_id.clone(),
        })
        .await?;
    tracing::info!("job {} created by {}", job.id, &req.caller.user_id);
    ensure_owned(&req.caller, job)
}

pub async fn update(
    repo: &dyn JobRepository,
    req: JobRequest<UpdateJobInput>,
) -> Result<JobEntry> {
    let input = &req.payload;
    if input.company.as_deref() == Some("") || input.position.as_deref() == Some("") {
        return Err(ApiError::BadRequest(
            "Company or Position fields cannot be empty".into(),
        ));
    }
    let id = req.parsed_id()?;
    let filter = authorize(&req.caller, req.caller.scope_job(id))?;
    let patch = JobPatch {
        company: input.company.clone(),
        position: input.position.clone(),
        status: input.status,
    };
    match repo.update_one(&filter, patch).await? {
        Some(job) => {
            tracing::info!("job {} updated by {}", job.id, &req.caller.user_id);
            ensure_owned(&req.caller, job)
        }
        None => Err(ApiError::job_not_found(id)),
    }
}

/// Deletes the job and returns the confirmation message.
pub async fn remove(repo: &dyn JobRepository, req: JobRequest) -> Result<String> {
    let id = req.parsed_id()?;
    let filter = authorize(&req.caller, req.caller.scope_job(id))?;
    match repo.remove_one(&filter).await? {
        Some(job) => {
            tracing::info!("job {} deleted by {}", job.id, &req.caller.user_id);
            Ok(format!("job with id: {} has been deleted", id))
        }
        None => Err(ApiError::job_not_found(id)),
    }
}
