use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gympro::backend::{HttpBackend, SharedBackend};
use gympro::config::Config;
use gympro::routes;
use gympro::session::{observe_auth_events, AuthEvents};
use gympro::version::GIT_VERSION;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gympro=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("GymPro {}", GIT_VERSION);

    let app = match &config.backend {
        Some(backend_config) => {
            tracing::info!("Using backend at {}", backend_config.url);
            let backend: SharedBackend = Arc::new(HttpBackend::new(backend_config.clone())?);

            let events = AuthEvents::new();
            tokio::spawn(observe_auth_events(events.subscribe()));

            routes::create_app(backend, events)
        }
        None => {
            tracing::warn!("BACKEND_URL and BACKEND_ANON_KEY are not set, serving setup page only");
            routes::create_setup_router()
        }
    };

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
