use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::{
            auth::Caller,
            jobs::{self, CreateJobInput, JobList, JobRequest, UpdateJobInput},
        },
        server::state::AppState,
    },
    prelude::{ApiError, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Arc<Caller>>,
) -> Result<Json<JobList>> {
    let jobs = jobs::list(&*state.jobs, JobRequest::new(caller)).await?;
    Ok(Json(jobs))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(caller): Extension<Arc<Caller>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let job = jobs::get(&*state.jobs, JobRequest::new(caller).with_id(id)).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Arc<Caller>>,
    WithRejection(Json(input), _): WithRejection<Json<CreateJobInput>, ApiError>,
) -> Result<(StatusCode, Json<Value>)> {
    let job = jobs::create(&*state.jobs, JobRequest::new(caller).with_payload(input)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Arc<Caller>>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateJobInput>, ApiError>,
) -> Result<Json<Value>> {
    let job = jobs::update(
        &*state.jobs,
        JobRequest::new(caller).with_id(id).with_payload(input),
    )
    .await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Arc<Caller>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let message = jobs::remove(&*state.jobs, JobRequest::new(caller).with_id(id)).await?;
    Ok(Json(json!({ "message": message })))
}
