use crate::api::{ChangePasswordRequest, DealerResponse, MessageResponse};
use crate::error::ApiError;
use crate::routes::ttl;
use crate::state::AppState;
use axum::{Extension, Json, extract::State, http::StatusCode};
use showroom::auth::{Dealer, ProfileUpdate, Registration};
use showroom::keys;
use tracing::{debug, info};

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Registration>,
) -> Result<(StatusCode, Json<DealerResponse>), ApiError> {
    let dealer = state.dealer_service.register(req).await?;

    info!("REGISTER: dealer_id={}, email={}", dealer.id, dealer.email);

    Ok((StatusCode::CREATED, Json(dealer.into())))
}

/// GET /api/auth/me
///
/// Cache-aside under `user:{id}` rather than the request URL, which is the
/// same for every dealer.
pub async fn me(
    State(state): State<AppState>,
    Extension(current): Extension<Dealer>,
) -> Result<Json<DealerResponse>, ApiError> {
    let key = keys::profile(&current.id);

    if let Some(profile) = state.cache.get::<DealerResponse>(&key).await {
        return Ok(Json(profile));
    }

    debug!(dealer_id = %current.id, "Profile cache miss");
    let profile = DealerResponse::from(state.dealer_service.get_dealer(&current.id).await?);
    state.cache.set(&key, &profile, Some(ttl::PROFILE)).await;

    Ok(Json(profile))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<Dealer>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<DealerResponse>, ApiError> {
    let dealer = state
        .dealer_service
        .update_profile(&current.id, update)
        .await?;

    info!("UPDATE_PROFILE: dealer_id={}", dealer.id);
    state.invalidator.profile_changed(&dealer.id).await;

    Ok(Json(dealer.into()))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<Dealer>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .dealer_service
        .change_password(&current.id, &req.current_password, &req.new_password)
        .await
        .map_err(|e| match e {
            showroom::auth::AuthError::InvalidCredentials => {
                ApiError::BadRequest("Current password is incorrect".into())
            }
            other => other.into(),
        })?;

    info!("CHANGE_PASSWORD: dealer_id={}", current.id);
    state.invalidator.password_changed(&current.id).await;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
