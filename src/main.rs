use std::sync::Arc;

use advice_gateway::{config::Config, panic_hook, routes, state::AppState};
use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("advice_gateway=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(port = config.port, mode = ?config.mode, "environment loaded");
    panic_hook::install(config.mode.is_production());

    let state = Arc::new(AppState::from_config(&config));

    // Startup probe, for the logs only.
    let gateway = state.gateway.clone();
    tokio::spawn(async move {
        if gateway.test_provider().await {
            info!("Gemini API working");
        } else {
            warn!("Gemini API is not working. The application will use mock responses.");
        }
    });

    let app = routes::create_router(config.mode)
        .with_state(state)
        .layer(routes::cors_layer(config.cors_origin.as_deref()));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            error!("Port {} is already in use. Please use a different port.", config.port);
            return Err(e.into());
        }
        Err(e) => return Err(e).context("failed to bind listener"),
    };

    info!("Server running on port {}", config.port);
    info!("Health check available at http://localhost:{}/health", config.port);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
