use std::sync::Arc;

use message_service::middleware::logging;
use message_service::{config, db, migrations, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cfg = Arc::new(config::Config::from_env()?);

    let db = db::init_pool(&cfg.database_url).await?;

    // Run embedded migrations (idempotent); the schema must be in sync
    // before the first request is served
    migrations::run_all(&db).await?;

    let state = AppState {
        db,
        config: cfg.clone(),
    };

    let bind_addr = format!("0.0.0.0:{}", cfg.port);
    tracing::info!(%bind_addr, "starting message-service");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, routes::build_router(state)).await?;

    Ok(())
}
