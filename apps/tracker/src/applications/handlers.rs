//! Axum route handlers for `/applications`.
//!
//! Every handler takes an `Owner`, so the access guard runs first on each
//! request. Body and query rejections are turned into `AppError::Validation`
//! to keep the `{error}` payload shape.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::validation::{describe, validate};
use crate::auth::Owner;
use crate::errors::AppError;
use crate::models::{Application, ApplicationPayload, ApplicationUpdate, NewApplication};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Uuid,
}

fn validated(payload: &ApplicationPayload) -> Result<NewApplication, AppError> {
    validate(payload).map_err(|errors| AppError::Validation(describe(&errors)))
}

/// GET /applications
pub async fn handle_list(
    _owner: Owner,
    State(state): State<AppState>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// POST /applications
pub async fn handle_create(
    _owner: Owner,
    State(state): State<AppState>,
    payload: Result<Json<ApplicationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let Json(payload) = payload?;
    let new = validated(&payload)?;
    let created = state.store.insert(new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /applications
///
/// Full overwrite keyed by `id`. The body returned is the record as it was
/// *before* the update; clients refetch the list to see the new state.
pub async fn handle_update(
    _owner: Owner,
    State(state): State<AppState>,
    payload: Result<Json<ApplicationUpdate>, JsonRejection>,
) -> Result<Json<Application>, AppError> {
    let Json(update) = payload?;
    let fields = validated(&update.fields)?;
    let previous = state
        .store
        .replace(update.id, fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    Ok(Json(previous))
}

/// DELETE /applications?id=<uuid>
///
/// 204 when a record was removed, 404 when `id` is unknown.
pub async fn handle_delete(
    _owner: Owner,
    State(state): State<AppState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(DeleteQuery { id }) = query?;
    if state.store.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Application not found".to_string()))
    }
}
