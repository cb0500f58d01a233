use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::jobs::{
        selectors::{COLUMNS, bind_filter, where_clause},
        spec::{JobEntry, JobFilter, JobPatch, NewJob},
    },
    prelude::Result,
};

/// SET placeholders come first, then the filter's, matching the bind order
/// in `JobMutator::update_one`.
pub(super) fn update_statement(filter: &JobFilter, patch: &JobPatch) -> String {
    let mut query = String::from("UPDATE jobs SET updated_at = CURRENT_TIMESTAMP");
    let mut param_count = 0;

    if patch.company.is_some() {
        param_count += 1;
        query.push_str(&format!(", company = ${}", param_count));
    }
    if patch.position.is_some() {
        param_count += 1;
        query.push_str(&format!(", position = ${}", param_count));
    }
    if patch.status.is_some() {
        param_count += 1;
        query.push_str(&format!(", status = ${}", param_count));
    }

    query.push_str(&format!(
        " WHERE id = (SELECT id FROM jobs{} ORDER BY created_at ASC LIMIT 1 FOR UPDATE) RETURNING {}",
        where_clause(filter, param_count),
        COLUMNS
    ));
    query
}

pub(super) fn remove_statement(filter: &JobFilter) -> String {
    format!(
        "DELETE FROM jobs WHERE id = (SELECT id FROM jobs{} ORDER BY created_at ASC LIMIT 1 FOR UPDATE) RETURNING {}",
        where_clause(filter, 0),
        COLUMNS
    )
}

pub struct JobMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &NewJob) -> Result<JobEntry> {
        let query = format!(
            r#"
            INSERT INTO jobs (company, position, status, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = sqlx::query_as::<_, JobEntry>(&query)
            .bind(&job.company)
            .bind(&job.position)
            .bind(job.status)
            .bind(&job.created_by)
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(row)
    }

    /// Updates the first row matching `filter` in a single statement.
    pub async fn update_one(
        &mut self,
        filter: &JobFilter,
        patch: &JobPatch,
    ) -> Result<Option<JobEntry>> {
        let query = update_statement(filter, patch);
        let mut q = sqlx::query_as::<_, JobEntry>(&query);
        if let Some(company) = &patch.company {
            q = q.bind(company);
        }
        if let Some(position) = &patch.position {
            q = q.bind(position);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }
        let row = bind_filter(q, filter)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    /// Removes the first row matching `filter` and hands it back.
    pub async fn remove_one(&mut self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let query = remove_statement(filter);
        let row = bind_filter(sqlx::query_as::<_, JobEntry>(&query), filter)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }
}
