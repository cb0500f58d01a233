use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{
    pkg::server::state::AppState,
    prelude::{ApiError, Result},
};

/// Resolves the bearer token to a `Caller` and hands it to the handlers
/// through request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        match state.tokens.verify(bearer.token()) {
            Ok(caller) => {
                tracing::debug!("authenticated {}", &caller.user_id);
                request.extensions_mut().insert(Arc::new(caller));
                return Ok(next.run(request).await);
            }
            Err(_) => {
                tracing::warn!("invalid token, authentication denied");
            }
        }
    } else {
        tracing::warn!("token missing, authentication denied");
    }
    Err(ApiError::Unauthenticated("Authentication invalid".into()))
}
