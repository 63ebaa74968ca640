use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use showroom::auth::Dealer;
use tracing::debug;

/// Extract Basic Auth credentials from Authorization header
fn extract_basic_auth(auth_header: &str) -> Option<(String, String)> {
    // Authorization: Basic <base64>
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 || parts[0] != "Basic" {
        return None;
    }

    let decoded = STANDARD.decode(parts[1]).ok()?;
    let decoded_str = String::from_utf8(decoded).ok()?;

    // Split email:password
    let mut parts = decoded_str.splitn(2, ':');
    let email = parts.next()?.to_string();
    let password = parts.next()?.to_string();

    Some((email, password))
}

/// Authenticate the dealer making the request and attach it to the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            ApiError::Unauthorized("No token, authorization denied".into()).into_response()
        })?;

    let (email, password) = extract_basic_auth(auth_header).ok_or_else(|| {
        ApiError::Unauthorized("Invalid Authorization header format".into()).into_response()
    })?;

    let dealer = state
        .dealer_service
        .authenticate(&email, &password)
        .await
        .map_err(|e| {
            debug!(email = %email, error = %e, "Authentication failed");
            ApiError::from(e).into_response()
        })?;

    request.extensions_mut().insert(dealer);

    Ok(next.run(request).await)
}

/// Extract authenticated dealer from request extensions
pub fn get_authenticated_dealer(request: &Request) -> Option<&Dealer> {
    request.extensions().get::<Dealer>()
}
