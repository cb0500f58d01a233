pub mod jobs;
pub mod probes;

use crate::prelude::ApiError;

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route does not exist".into())
}
