use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use doc_retriever::api;
use doc_retriever::config::Config;
use doc_retriever::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Embedding provider: {} ({})",
        config.embedding.provider,
        config.embedding.base_url
    );
    tracing::info!(
        "Hosted store: {} collection '{}' namespace '{}'",
        config.qdrant.url,
        config.qdrant.collection,
        config.qdrant.namespace
    );

    let state = AppState::new(config.clone())?;
    state.seed_memory().await;

    let app = Router::new()
        .route("/health", get(api::meta::health))
        .route("/jp", get(api::meta::jp))
        .route("/collections", get(api::meta::collections))
        .route("/invoke", post(api::retrieve::invoke))
        .route("/batch", post(api::retrieve::batch))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
