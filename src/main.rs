use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use locale_gateway::config::Config;
use locale_gateway::i18n::LocaleRegistry;
use locale_gateway::server::{self, AppState};
use locale_gateway::session::{MemoryProfileStore, SessionState, WatchIdentity};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_gateway=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;

    // Install the locale registry before anything consults it
    let registry = LocaleRegistry::install(LocaleRegistry::from_codes(
        &config.supported_locales,
        &config.default_locale,
    )?)?;

    info!(
        locales = %config.supported_locales.join(","),
        default = %config.default_locale,
        "Locale registry initialized"
    );

    let port = config.port;
    let state = Arc::new(AppState {
        config,
        registry,
        identity: Arc::new(WatchIdentity::new(SessionState::Anonymous)),
        profiles: Arc::new(MemoryProfileStore::default()),
    });

    let app = server::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
