use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dinnerbot::config::AppConfig;
use dinnerbot::handlers;
use dinnerbot::services::messaging::messenger::MessengerClient;
use dinnerbot::services::search::yelp::YelpClient;
use dinnerbot::services::slots::{InMemorySlotStore, TurnLocks};
use dinnerbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "missing config values");
            std::process::exit(1);
        }
    };

    if config.yelp_api_key.is_empty() {
        tracing::warn!("YELP_API_KEY not set, restaurant searches will fail");
    }

    let state = Arc::new(AppState {
        slots: Box::new(InMemorySlotStore::new()),
        turn_locks: TurnLocks::new(),
        messaging: Box::new(MessengerClient::new(
            config.graph_api_url.clone(),
            config.page_access_token.clone(),
        )),
        profiles: Box::new(MessengerClient::new(
            config.graph_api_url.clone(),
            config.page_access_token.clone(),
        )),
        search: Box::new(YelpClient::new(
            config.yelp_api_url.clone(),
            config.yelp_api_key.clone(),
        )),
        config: config.clone(),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
