//! Codebound Chronicles API server entry point.

use std::sync::Arc;

use codebound_api::config::AppConfig;
use codebound_api::error::AppError;
use codebound_api::state::AppState;
use codebound_core::clock::SystemClock;
use codebound_core::repository::SaveRepository;
use codebound_core::rng::SeededRngSource;
use codebound_save_store::file_save_repository::FileSaveRepository;
use codebound_save_store::pg_save_repository::PgSaveRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

async fn save_repository(config: &AppConfig) -> Result<Arc<dyn SaveRepository>, AppError> {
    if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let repo = PgSaveRepository::new(pool);
        repo.ensure_schema().await?;
        tracing::info!("Using PostgreSQL save store");
        return Ok(Arc::new(repo));
    }

    let repo = FileSaveRepository::open(&config.save_dir).await?;
    tracing::info!(dir = %repo.dir().display(), "Using file save store");
    Ok(Arc::new(repo))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Codebound Chronicles API server");

    let config = AppConfig::from_env()?;
    let saves = save_repository(&config).await?;

    let rng_source = SeededRngSource::new(config.rng_seed);
    let app_state = AppState::new(Arc::new(SystemClock), Arc::new(rng_source), saves)?;

    let app = codebound_api::app(app_state).layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
