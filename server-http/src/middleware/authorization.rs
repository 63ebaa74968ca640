use super::authentication::get_authenticated_dealer;
use crate::error::ApiError;
use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// Only the dealer named by the `{id}` path segment may go further.
///
/// Runs after [`auth_middleware`](super::auth_middleware) and before any
/// cache layer, so one dealer never reads another's cached private data.
pub async fn require_owner(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let dealer = get_authenticated_dealer(&request)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()).into_response())?;

    match params.get("id") {
        Some(id) if *id == dealer.id => Ok(next.run(request).await),
        _ => Err(ApiError::Forbidden.into_response()),
    }
}
