use std::sync::Arc;

use property_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::{Catalog, FeedbackStore, LogNotifier},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => {
            tracing::info!("No CATALOG_PATH set, using demo catalog");
            Catalog::demo()
        }
    };

    let feedback = FeedbackStore::open(&config.feedback_path)?;

    // Initialize application state
    let state = AppState::from_config(&config, catalog, feedback, Arc::new(LogNotifier));

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
