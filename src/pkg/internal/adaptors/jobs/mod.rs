pub mod memory;
pub mod mutators;
pub mod selectors;
pub mod spec;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use validator::Validate;

use crate::prelude::Result;
use mutators::JobMutator;
use selectors::JobSelector;
use spec::{JobEntry, JobFilter, JobPatch, NewJob};

/// Document-store style access to jobs. Implementations apply the filter as
/// given; deciding which filter a caller may use is not their concern.
#[async_trait]
pub trait JobRepository: Send + Sync + std::fmt::Debug {
    /// All matches, oldest first.
    async fn find(&self, filter: &JobFilter) -> Result<Vec<JobEntry>>;
    async fn find_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>>;
    /// Validates, assigns id and timestamps, stores.
    async fn insert(&self, job: NewJob) -> Result<JobEntry>;
    /// Atomically applies `patch` to the first match and returns the new state.
    async fn update_one(&self, filter: &JobFilter, patch: JobPatch) -> Result<Option<JobEntry>>;
    /// Atomically removes the first match and returns it.
    async fn remove_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>>;
    async fn ping(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgJobRepository {
    pool: Arc<PgPool>,
}

impl PgJobRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgJobRepository { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn find(&self, filter: &JobFilter) -> Result<Vec<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut conn).find(filter).await
    }

    async fn find_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobSelector::new(&mut conn).find_one(filter).await
    }

    async fn insert(&self, job: NewJob) -> Result<JobEntry> {
        job.validate()?;
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut conn).create(&job).await
    }

    async fn update_one(&self, filter: &JobFilter, patch: JobPatch) -> Result<Option<JobEntry>> {
        patch.validate()?;
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut conn).update_one(filter, &patch).await
    }

    async fn remove_one(&self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let mut conn = self.pool.acquire().await?;
        JobMutator::new(&mut conn).remove_one(filter).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("select 1").execute(&*self.pool).await?;
        Ok(())
    }
}
