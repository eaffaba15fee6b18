use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::issue_token;
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::services::UserService;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /auth/register - create a user and log them in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let user = UserService::register(&state.db, &state.config.hashing, &body).await?;
    let token = issue_token(&user.username, &state.config.jwt_secret)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /auth/login - verify credentials, then stamp last_login_at as an
/// explicit second step.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserService::authenticate(&state.db, &body.username, &body.password).await?;
    UserService::record_login(&state.db, &user.username).await?;
    let token = issue_token(&user.username, &state.config.jwt_secret)?;

    Ok(Json(TokenResponse { token }))
}
