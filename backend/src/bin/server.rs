//! Dealership HTTP Server Binary
//!
//! Main entry point for the dealership REST API. It loads configuration,
//! seeds the in-memory repository, sets up the HTTP router and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dealership-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`, `PORT`: listener address (default: 0.0.0.0:3000)
//! - `JWT_SECRET`, `TOKEN_TTL_HOURS`: token signing
//! - `ADMIN_PASSWORD`: password of the seeded `admin` user
//! - `SEED_MOCK_VIEWS`: backfill 30 days of synthetic views (default: true)
//! - `CORS_ORIGIN`: allowed browser origin (default: any)
//! - `RUST_LOG`: log filter (default: info)
//!
//! Every variable overrides the matching key of `dealership.toml`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dealership::config::AppConfig;
use dealership::db::{self, FullRepository, LocalRepository};
use dealership::http::{cors_layer, create_router_with_cors, AppState};
use dealership::services::TokenService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting dealership HTTP server");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repository: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    db::seed::seed_defaults(repository.as_ref(), &config.auth.admin_password)
        .await
        .context("Failed to seed default data")?;

    if config.analytics.seed_mock_views {
        let mut rng = StdRng::from_entropy();
        let written = db::services::seed_mock_views(repository.as_ref(), &mut rng, Utc::now())
            .await
            .context("Failed to seed mock views")?;
        info!(events = written, "Mock view history generated");
    }

    let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_hours)
        .context("Invalid token settings")?;
    let state = AppState::new(repository, tokens)
        .with_analytics_window_days(config.analytics.default_window_days);
    let app = create_router_with_cors(state, cors_layer(config.server.cors_origin.as_deref()));

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
