//! Dealer-owned collections sharing one set of handlers; the collection comes
//! from a route-level `Extension`.

use crate::api::{InventoryQuery, MessageResponse, SearchQuery, collection_page};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Map, Value};
use showroom::documents::{Collection, Document, Page, PageRequest};
use tracing::info;

/// GET /api/dealer/{id}/{collection} with optional field filters
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(dealer_id): Path<String>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Value>, ApiError> {
    state.dealer_service.get_dealer(&dealer_id).await?;

    let documents = query
        .filter()
        .apply(state.documents.list(collection, &dealer_id).await?);
    let page = Page::from_items(documents, PageRequest::new(query.page, query.limit));

    Ok(Json(collection_page(collection, page)))
}

/// GET /api/dealer/{id}/{collection}/{item_id}
pub async fn get_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path((dealer_id, item_id)): Path<(String, String)>,
) -> Result<Json<Document>, ApiError> {
    state
        .documents
        .find(collection, &dealer_id, &item_id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(collection))
}

/// POST /api/dealer/{id}/{collection}
pub async fn create_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(dealer_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state
        .documents
        .insert(collection, &dealer_id, object(body)?)
        .await?;

    info!("CREATE: collection={}, dealer_id={}, id={}", collection, dealer_id, document.id);
    state
        .invalidator
        .collection_changed(&dealer_id, collection.as_str())
        .await;

    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/dealer/{id}/{collection}/{item_id}
pub async fn update_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path((dealer_id, item_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    let document = state
        .documents
        .update(collection, &dealer_id, &item_id, object(body)?)
        .await?
        .ok_or_else(|| not_found(collection))?;

    info!("UPDATE: collection={}, dealer_id={}, id={}", collection, dealer_id, item_id);
    state
        .invalidator
        .collection_changed(&dealer_id, collection.as_str())
        .await;

    Ok(Json(document))
}

/// DELETE /api/dealer/{id}/{collection}/{item_id}
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path((dealer_id, item_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state
        .documents
        .delete(collection, &dealer_id, &item_id)
        .await?
    {
        return Err(not_found(collection));
    }

    info!("DELETE: collection={}, dealer_id={}, id={}", collection, dealer_id, item_id);
    state
        .invalidator
        .collection_changed(&dealer_id, collection.as_str())
        .await;

    Ok(Json(MessageResponse::new(format!(
        "{} removed",
        collection.item_label()
    ))))
}

/// GET /api/dealer/{id}/posts/search?text=
///
/// Case-insensitive match on title or description.
pub async fn search_posts(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let text = query
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search text is required".into()))?
        .to_lowercase();

    let matches = |doc: &Document| {
        ["title", "description"].iter().any(|field| {
            doc.field_str(field)
                .is_some_and(|value| value.to_lowercase().contains(&text))
        })
    };

    let posts: Vec<Document> = state
        .documents
        .list(Collection::Posts, &dealer_id)
        .await?
        .into_iter()
        .filter(|doc| matches(doc))
        .collect();
    let page = Page::from_items(posts, PageRequest::new(query.page, query.limit));

    Ok(Json(collection_page(Collection::Posts, page)))
}

fn not_found(collection: Collection) -> ApiError {
    ApiError::NotFound(format!("{} not found", collection.item_label()))
}

fn object(body: Value) -> Result<Map<String, Value>, ApiError> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::BadRequest("Request body must be a JSON object".into())),
    }
}
