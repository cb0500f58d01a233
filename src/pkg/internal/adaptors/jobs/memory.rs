use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::{
    pkg::internal::adaptors::jobs::{
        JobRepository,
        spec::{JobEntry, JobFilter, JobPatch, NewJob},
    },
    prelude::Result,
};

/// Process-local job store. Rows are kept in insertion order, which is also
/// creation order.
#[derive(Debug, Default)]
pub struct MemoryJobRepository {
    rows: RwLock<Vec<JobEntry>>,
}

impl MemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn find(&self, filter: &JobFilter) -> Result<Vec<JobEntry>> {
        let rows = self.rows.read().await;
        let mut found: Vec<JobEntry> = rows.iter().filter(|j| filter.matches(j)).cloned().collect();
        found.sort_by_key(|j| j.created_at);
        Ok(found)
    }

    async fn find_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|j| filter.matches(j)).cloned())
    }

    async fn insert(&self, job: NewJob) -> Result<JobEntry> {
        job.validate()?;
        let now = Utc::now();
        let entry = JobEntry {
            id: Uuid::new_v4(),
            company: job.company,
            position: job.position,
            status: job.status,
            created_by: job.created_by,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn update_one(&self, filter: &JobFilter, patch: JobPatch) -> Result<Option<JobEntry>> {
        patch.validate()?;
        let mut rows = self.rows.write().await;
        let Some(job) = rows.iter_mut().find(|j| filter.matches(j)) else {
            return Ok(None);
        };
        if let Some(company) = patch.company {
            job.company = company;
        }
        if let Some(position) = patch.position {
            job.position = position;
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn remove_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let mut rows = self.rows.write().await;
        Ok(rows
            .iter()
            .position(|j| filter.matches(j))
            .map(|idx| rows.remove(idx)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
