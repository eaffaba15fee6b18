use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::middleware::{auth::auth_middleware, logging};
use crate::state::AppState;

pub mod auth;
pub mod messages;
pub mod users;

use auth::{login, register};
use messages::{get_message, mark_message_read, send_message};
use users::{get_user, list_users, messages_from_user, messages_to_user};

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users", get(list_users))
        .route("/users/:username", get(get_user))
        .route("/users/:username/to", get(messages_to_user))
        .route("/users/:username/from", get(messages_from_user))
        .route("/messages", post(send_message))
        .route("/messages/:id", get(get_message))
        .route("/messages/:id/read", post(mark_message_read))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    logging::add_tracing(router).with_state(state)
}
