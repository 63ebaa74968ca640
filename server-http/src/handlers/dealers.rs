use crate::api::{DealerListResponse, DealerResponse, PageQuery};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use showroom::documents::{Page, PageRequest};

/// GET /api/dealer - Active dealers, newest first
pub async fn list_dealers(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DealerListResponse>, ApiError> {
    let mut dealers = state.dealer_service.list_dealers().await?;
    dealers.retain(|d| d.is_active());
    dealers.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page = Page::from_items(dealers, PageRequest::new(query.page, query.limit));
    Ok(Json(page.map(DealerResponse::from).into()))
}

/// GET /api/dealer/{id}
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DealerResponse>, ApiError> {
    let dealer = state.dealer_service.get_dealer(&id).await?;
    Ok(Json(dealer.into()))
}
