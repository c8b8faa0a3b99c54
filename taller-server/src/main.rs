mod config;
mod mailer;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::mailer::SmtpMailer;
use crate::state::AppState;
use crate::store::RegistrationStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;

    let ticket_path = config.ticket_path();
    if ticket_path.exists() {
        tracing::info!(path = %ticket_path.display(), "ticket template found");
    } else {
        tracing::error!(path = %ticket_path.display(), "ticket template not found");
    }

    let store = RegistrationStore::connect(config.database_url().as_deref()).await;
    tracing::info!(durable = store.is_durable(), "registration store ready");
    let mailer = SmtpMailer::new(config.smtp())?;

    let cors = cors_layer(&config.cors_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState::new(config, store, Arc::new(mailer));
    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("taller-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Allow the configured origins. Requests without an Origin header are
/// not subject to CORS and pass through untouched.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
