use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use checklist_core::model::ChecklistDocument;
use checklist_core::remote::{Identity, RemoteRecord};
use checklist_core::ChecklistError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/checklists/{user_id}: the identity's record, or 404.
pub async fn get_checklist(
    State(app): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RemoteRecord>, AppError> {
    let identity = Identity::new(user_id)?;
    let db = app.db.clone();
    let key = identity.clone();
    let record = tokio::task::spawn_blocking(move || db.get(&key))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match record {
        Some(record) => Ok(Json(record)),
        None => Err(AppError::not_found(format!("no checklist for '{identity}'"))),
    }
}

/// PUT /api/checklists/{user_id}: create or replace the identity's record.
///
/// Body: `{ "checklist_data": <document> }`, validated the same way clients
/// validate it on read.
pub async fn put_checklist(
    State(app): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RemoteRecord>, AppError> {
    let identity = Identity::new(user_id)?;
    let Json(mut body) = body.map_err(|e| AppError::bad_request(e.body_text()))?;
    let data = body
        .get_mut("checklist_data")
        .map(serde_json::Value::take)
        .ok_or_else(|| ChecklistError::InvalidDocument("missing field `checklist_data`".into()))?;
    let doc = ChecklistDocument::from_value(data)?;

    let db = app.db.clone();
    let key = identity.clone();
    let record = tokio::task::spawn_blocking(move || db.upsert(&key, &doc))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    tracing::info!(identity = %identity, "checklist stored");
    Ok(Json(record))
}
