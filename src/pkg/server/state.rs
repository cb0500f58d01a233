use std::sync::Arc;

use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

use crate::{
    conf::settings,
    pkg::internal::{
        adaptors::jobs::{JobRepository, PgJobRepository, memory::MemoryJobRepository},
        auth::TokenAuthority,
    },
    prelude::Result,
};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub tokens: Arc<TokenAuthority>,
}

impl AppState {
    pub async fn new(in_memory: bool) -> Result<AppState> {
        let jobs: Arc<dyn JobRepository> = if in_memory {
            tracing::warn!("using in-memory job storage, data is lost on exit");
            Arc::new(MemoryJobRepository::new())
        } else {
            Arc::new(PgJobRepository::new(Arc::new(db_pool()?)))
        };
        Ok(AppState::from_parts(
            jobs,
            TokenAuthority::new(&settings.jwt_secret, settings.jwt_lifetime_hours),
        ))
    }

    pub fn from_parts(jobs: Arc<dyn JobRepository>, tokens: TokenAuthority) -> AppState {
        AppState {
            jobs,
            tokens: Arc::new(tokens),
        }
    }
}
