//! Citelens API server.
//!
//! Run with: cargo run -p citelens-web

use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = citelens_web::config::AppConfig::from_env();
    let port = config.port;

    info!(user_id = %config.scholar_user_id, "Starting Citelens API server");

    let state = citelens_web::state::AppState::from_config(config).await;
    let app = citelens_web::router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
