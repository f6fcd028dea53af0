//! # Creator Grenade API Server
//!
//! Serves the content library, magic-link sign-in and AI suggestions.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... cargo run -p grenade-api
//! ```
//!
//! Without `DATABASE_URL` the server keeps everything in memory. Set
//! `LOG_FORMAT=json` for structured logs.

use std::sync::Arc;

use grenade_api::{
    app::{build_router, AppState},
    config::Config,
};
use grenade_shared::{
    auth::mailer::LogMailer,
    db::{self, pool::DatabaseConfig},
    generate::OpenAiGenerator,
    store::{ContentStore, MemoryStore, PgStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Creator Grenade API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let store = connect_store(&config).await?;

    let generator = OpenAiGenerator::new(
        config.openai.base_url.clone(),
        config.openai.model.clone(),
        config.openai.api_key.clone(),
    )?;
    if config.openai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; /api/generate will fail");
    }

    let addr = config.bind_address();
    let state = AppState::new(store, Arc::new(generator), Arc::new(LogMailer), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "grenade_api=debug,grenade_shared=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn ContentStore>> {
    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL not set; using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = db::pool::create_pool(DatabaseConfig {
        url: database.url.clone(),
        max_connections: database.max_connections,
        ..DatabaseConfig::default()
    })
    .await?;

    db::migrations::run_migrations(&pool).await?;

    Ok(Arc::new(PgStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
