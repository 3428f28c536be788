use crate::{
    domain::entities::{BookmarkView, ContactView},
    infrastructure::http::{
        middleware::{ApiError, ApiResult, AppState},
        response::Envelope,
    },
    shared::utils::{parse_bookmark_payload, parse_contact_payload},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

pub async fn list_contacts(
    State(state): State<AppState>,
) -> ApiResult<Envelope<Vec<ContactView>>> {
    let contacts = state.contact_service.list_contacts().await?;
    Ok(Envelope::ok("Fetched successfully", contacts))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<ContactView>> {
    let id = parse_contact_id(&id)?;
    let contact = state.contact_service.get_contact(id).await?;
    Ok(Envelope::ok("Fetched successfully", contact))
}

pub async fn create_contact(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<Envelope<ContactView>>)> {
    let draft = parse_contact_payload(payload.map(|Json(body)| body))?;
    let contact = state.contact_service.create_contact(draft).await?;
    Ok(Envelope::ok("Created successfully", contact).with_status(StatusCode::CREATED))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Envelope<ContactView>> {
    let id = parse_contact_id(&id)?;
    let draft = match parse_contact_payload(payload.map(|Json(body)| body)) {
        Ok(draft) => draft,
        Err(err) => {
            // A body error on an unknown id still reports 404
            state.contact_service.get_contact(id).await?;
            return Err(err.into());
        }
    };
    let contact = state.contact_service.update_contact(id, draft).await?;
    Ok(Envelope::ok("Updated successfully", contact))
}

pub async fn set_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Envelope<BookmarkView>> {
    let id = parse_contact_id(&id)?;
    let is_bookmarked = match parse_bookmark_payload(payload.map(|Json(body)| body)) {
        Ok(flag) => flag,
        Err(err) => {
            state.contact_service.get_contact(id).await?;
            return Err(err.into());
        }
    };
    let bookmark = state.contact_service.set_bookmark(id, is_bookmarked).await?;
    Ok(Envelope::ok("Bookmark status updated", bookmark))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<Value>> {
    let id = parse_contact_id(&id)?;
    state.contact_service.delete_contact(id).await?;
    Ok(Envelope::ok("Deleted successfully", json!({})))
}

/// Ids are integers; anything else cannot name a stored contact.
fn parse_contact_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Contact not found".to_string()))
}
