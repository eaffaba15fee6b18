use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::guards::AuthUser;
use crate::models::message::SendMessageRequest;
use crate::services::MessageService;
use crate::state::AppState;

/// POST /messages - send a message; the sender is the authenticated user.
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let message =
        MessageService::create(&state.db, &auth.username, &body.to_username, &body.body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

/// GET /messages/:id - message detail; participants only.
pub async fn get_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let message = MessageService::fetch(&state.db, id).await?;
    auth.ensure_is_participant(&message)?;
    let detail = MessageService::enrich(&state.db, message).await?;
    Ok(Json(json!({ "message": detail })))
}

/// POST /messages/:id/read - recipient marks the message read; the ledger
/// rejects anyone else with Forbidden.
pub async fn mark_message_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let detail = MessageService::mark_read(&state.db, id, &auth.username).await?;
    Ok(Json(json!({ "message": detail })))
}
