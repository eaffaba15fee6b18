use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::guards::AuthUser;
use crate::services::{MessageService, UserService};
use crate::state::AppState;

/// GET /users - basic info on all users.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let users = UserService::list(&state.db).await?;
    Ok(Json(json!({ "users": users })))
}

/// GET /users/:username - full profile, password hash excluded.
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserService::get(&state.db, &username).await?;
    Ok(Json(json!({ "user": user })))
}

/// GET /users/:username/to - messages received by the user.
/// Only that user may read their inbox.
pub async fn messages_to_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    auth.ensure_is_user(&username)?;
    let messages = MessageService::messages_to(&state.db, &username).await?;
    Ok(Json(json!({ "messages": messages })))
}

/// GET /users/:username/from - messages sent by the user.
pub async fn messages_from_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    auth.ensure_is_user(&username)?;
    let messages = MessageService::messages_from(&state.db, &username).await?;
    Ok(Json(json!({ "messages": messages })))
}
