use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracker::applications::postgres::PgApplicationStore;
use tracker::applications::store::{ApplicationStore, MemoryApplicationStore};
use tracker::auth::guard::AccessGuard;
use tracker::auth::identity::GoogleIdentityProvider;
use tracker::auth::oauth::{OAuthClient, OAuthSettings};
use tracker::config::Config;
use tracker::routes::build_router;
use tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tracker v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ApplicationStore> = match &config.database_url {
        Some(url) => Arc::new(PgApplicationStore::connect(url).await?),
        None => {
            warn!("DATABASE_URL not set; records are kept in memory and lost on exit");
            Arc::new(MemoryApplicationStore::new())
        }
    };

    let oauth = OAuthClient::new(OAuthSettings::google(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.oauth_redirect_url.clone(),
    ))?;

    let state = AppState {
        store,
        identity: Arc::new(GoogleIdentityProvider::new()?),
        guard: AccessGuard::new(config.owner_email.clone()),
        oauth,
    };
    info!("Access restricted to the configured owner");

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
