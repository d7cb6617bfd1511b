//! Exercise tracker entry-point: loads settings, connects the entity store
//! and serves the REST API until shutdown.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::domain::ExerciseLogService;
use exercise_tracker::domain::ports::StoreLifecycle;
use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::persistence::InMemoryEntityStore;
use ortho_config::OrthoConfig;

use server::{ServerConfig, TrackerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TrackerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid host: {e}")))?;

    let store = Arc::new(match settings.data_file.clone() {
        Some(path) => InMemoryEntityStore::with_snapshot(path),
        None => InMemoryEntityStore::new(),
    });
    store
        .connect()
        .await
        .map_err(|e| io::Error::other(format!("failed to connect entity store: {e}")))?;
    if !store.is_ready() {
        return Err(io::Error::other("entity store is not ready after connect"));
    }

    let service = Arc::new(ExerciseLogService::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
    ));
    let http_state = web::Data::new(HttpState::new(service.clone(), service));
    let health_state = web::Data::new(HealthState::watching(store.clone()));

    let config = ServerConfig::new(bind_addr).with_workers(settings.workers);
    let listen_addr = config.bind_addr();
    let server = create_server(health_state.clone(), http_state, config)?;
    info!(bind_addr = %listen_addr, "exercise tracker listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    match store.close().await {
        Ok(()) => info!("entity store closed"),
        Err(e) => error!(error = %e, "failed to close entity store"),
    }
    outcome
}
