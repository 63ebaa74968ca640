use crate::api::{LeadNoteRequest, LeadQuery, LeadSummaryResponse, collection_page};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Map, Value, json};
use showroom::documents::{Collection, Document, Page, PageRequest};
use std::collections::BTreeMap;
use tracing::info;

const DEFAULT_STATUS: &str = "new";

/// POST /api/dealer/{id}/leads - Public enquiry form
pub async fn create_lead(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::BadRequest("Request body must be a JSON object".into()));
    };

    let has_contact = ["email", "phone"]
        .iter()
        .any(|f| fields.get(*f).and_then(Value::as_str).is_some_and(|v| !v.is_empty()));
    if !has_contact {
        return Err(ApiError::BadRequest("Please provide an email or phone".into()));
    }

    state.dealer_service.get_dealer(&dealer_id).await?;

    fields
        .entry("status")
        .or_insert_with(|| Value::String(DEFAULT_STATUS.to_string()));

    let lead = state
        .documents
        .insert(Collection::Leads, &dealer_id, fields)
        .await?;

    info!("CREATE_LEAD: dealer_id={}, id={}", dealer_id, lead.id);
    state
        .invalidator
        .collection_changed(&dealer_id, Collection::Leads.as_str())
        .await;

    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/dealer/{id}/leads - Owner only, optional `?status=&inquiry=&priority=`
pub async fn list_leads(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
    Query(query): Query<LeadQuery>,
) -> Result<Json<Value>, ApiError> {
    let leads = query
        .filter()
        .apply(state.documents.list(Collection::Leads, &dealer_id).await?);

    let page = Page::from_items(leads, PageRequest::new(query.page, query.limit));
    Ok(Json(collection_page(Collection::Leads, page)))
}

/// GET /api/dealer/{id}/leads/analytics/summary
pub async fn lead_summary(
    State(state): State<AppState>,
    Path(dealer_id): Path<String>,
) -> Result<Json<LeadSummaryResponse>, ApiError> {
    let leads = state.documents.list(Collection::Leads, &dealer_id).await?;

    let mut by_status = BTreeMap::new();
    for lead in &leads {
        let status = lead.field_str("status").unwrap_or(DEFAULT_STATUS);
        *by_status.entry(status.to_string()).or_insert(0) += 1;
    }

    Ok(Json(LeadSummaryResponse {
        total: leads.len(),
        by_status,
    }))
}

/// GET /api/dealer/{id}/leads/{lead_id}
pub async fn get_lead(
    State(state): State<AppState>,
    Path((dealer_id, lead_id)): Path<(String, String)>,
) -> Result<Json<Document>, ApiError> {
    state
        .documents
        .find(Collection::Leads, &dealer_id, &lead_id)
        .await?
        .map(Json)
        .ok_or_else(lead_not_found)
}

/// PUT /api/dealer/{id}/leads/{lead_id} - Status and follow-up changes
pub async fn update_lead(
    State(state): State<AppState>,
    Path((dealer_id, lead_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Document>, ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest("Request body must be a JSON object".into()));
    };

    let lead = state
        .documents
        .update(Collection::Leads, &dealer_id, &lead_id, fields)
        .await?
        .ok_or_else(lead_not_found)?;

    info!("UPDATE_LEAD: dealer_id={}, id={}", dealer_id, lead_id);
    state
        .invalidator
        .collection_changed(&dealer_id, Collection::Leads.as_str())
        .await;

    Ok(Json(lead))
}

/// POST /api/dealer/{id}/leads/{lead_id}/notes - Append a follow-up note
pub async fn add_lead_note(
    State(state): State<AppState>,
    Path((dealer_id, lead_id)): Path<(String, String)>,
    Json(note): Json<LeadNoteRequest>,
) -> Result<Json<Document>, ApiError> {
    let (Some(content), Some(author)) = (required(note.content), required(note.author)) else {
        return Err(ApiError::BadRequest("Content and author are required".into()));
    };

    let lead = state
        .documents
        .find(Collection::Leads, &dealer_id, &lead_id)
        .await?
        .ok_or_else(lead_not_found)?;

    let mut notes = match lead.fields.get("notes") {
        Some(Value::Array(notes)) => notes.clone(),
        _ => Vec::new(),
    };
    notes.push(json!({
        "content": content,
        "author": author,
        "createdAt": Utc::now(),
    }));

    let mut fields = Map::new();
    fields.insert("notes".to_string(), Value::Array(notes));
    let lead = state
        .documents
        .update(Collection::Leads, &dealer_id, &lead_id, fields)
        .await?
        .ok_or_else(lead_not_found)?;

    info!("ADD_LEAD_NOTE: dealer_id={}, id={}", dealer_id, lead_id);
    state
        .invalidator
        .collection_changed(&dealer_id, Collection::Leads.as_str())
        .await;

    Ok(Json(lead))
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lead_not_found() -> ApiError {
    ApiError::NotFound(format!("{} not found", Collection::Leads.item_label()))
}
