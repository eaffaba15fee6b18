pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
