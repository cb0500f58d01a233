use sqlx::{PgConnection, Postgres, postgres::PgArguments, query::QueryAs};

use crate::{
    pkg::internal::adaptors::jobs::spec::{JobEntry, JobFilter},
    prelude::Result,
};

pub(super) const COLUMNS: &str =
    "id, company, position, status, created_by, created_at, updated_at";

/// Renders the filter as a WHERE clause whose placeholders start after `offset`.
pub(super) fn where_clause(filter: &JobFilter, offset: usize) -> String {
    let mut conditions = Vec::new();
    let mut param_count = offset;
    if filter.id.is_some() {
        param_count += 1;
        conditions.push(format!("id = ${}", param_count));
    }
    if filter.created_by.is_some() {
        param_count += 1;
        conditions.push(format!("created_by = ${}", param_count));
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Binds filter values in the same order `where_clause` numbered them.
pub(super) fn bind_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q JobFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if let Some(id) = filter.id {
        q = q.bind(id);
    }
    if let Some(owner) = &filter.created_by {
        q = q.bind(owner.as_str());
    }
    q
}

pub struct JobSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn find(&mut self, filter: &JobFilter) -> Result<Vec<JobEntry>> {
        let query = format!(
            "SELECT {} FROM jobs{} ORDER BY created_at ASC, id ASC",
            COLUMNS,
            where_clause(filter, 0)
        );
        let rows = bind_filter(sqlx::query_as::<_, JobEntry>(&query), filter)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_one(&mut self, filter: &JobFilter) -> Result<Option<JobEntry>> {
        let query = format!(
            "SELECT {} FROM jobs{} ORDER BY created_at ASC LIMIT 1",
            COLUMNS,
            where_clause(filter, 0)
        );
        let row = bind_filter(sqlx::query_as::<_, JobEntry>(&query), filter)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_where_clause_numbers_params() {
        let filter = JobFilter {
            id: Some(Uuid::new_v4()),
            created_by: Some("u-1".into()),
        };
        assert_eq!(where_clause(&filter, 0), " WHERE id = $1 AND created_by = $2");
        assert_eq!(where_clause(&filter, 3), " WHERE id = $4 AND created_by = $5");
    }

    #[test]
    fn test_where_clause_owner_only() {
        let filter = JobFilter {
            id: None,
            created_by: Some("u-1".into()),
        };
        assert_eq!(where_clause(&filter, 0), " WHERE created_by = $1");
        assert_eq!(where_clause(&JobFilter::default(), 0), "");
    }
}
