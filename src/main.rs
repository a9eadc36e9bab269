//! Leave Engine API server.
//!
//! Usage: `leave-engine [CONFIG_PATH]`. The path may also be given through
//! `LEAVE_ENGINE_CONFIG`; without either, built-in defaults are used.

use std::env;
use std::error::Error;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_engine::api::{create_app, AppState};
use leave_engine::config::ConfigLoader;
use leave_engine::store::open_store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,leave_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = match env::args().nth(1).or_else(|| env::var("LEAVE_ENGINE_CONFIG").ok()) {
        Some(path) => {
            tracing::info!(path = %path, "Loading configuration");
            ConfigLoader::load(path)?
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            ConfigLoader::default()
        }
    };
    let config = loader.config();

    let store = open_store(&config.storage).await?;
    let state = AppState::new(store, config.policy.clone());
    let app = create_app(state, &config.cors)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(
        address = %config.server.bind_address,
        backend = ?config.storage.backend,
        "Leave Engine listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
