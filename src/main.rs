//! Contact Desk - administrator login gate for the contact manager.
//!
//! Issues and verifies the bearer token that unlocks the client shell and
//! serves the prebuilt client bundle. Contact records stay in the browser.

use std::path::PathBuf;

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::auth::CredentialVerifier;
use crate::config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issues tokens on login and checks them on protected routes.
    pub verifier: CredentialVerifier,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    logging::init();

    tracing::info!("Starting Contact Desk v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        address = %config.bind_addr(),
        admin_email = %config.admin_email,
        frontend_dist = %config.frontend_dist_path,
        db_init = %config.enable_db_init,
        "Configuration loaded"
    );

    if config.uses_insecure_defaults() {
        tracing::warn!("JWT_SECRET or ADMIN_PASSWORD is a development default - set both for production");
    }

    if config.enable_db_init {
        storage::init_contacts_schema(&config.database_url)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database bootstrap failed");
                anyhow::anyhow!("Database bootstrap error: {}", e)
            })?;
        tracing::info!(database = %config.database_url, "Contacts table is ready");
    } else {
        tracing::info!("Database bootstrap skipped (ENABLE_DB_INIT=false)");
    }

    let state = AppState {
        verifier: CredentialVerifier::from_config(&config),
    };

    let frontend_dist = PathBuf::from(&config.frontend_dist_path);
    let frontend_dist = if frontend_dist.is_dir() {
        tracing::info!(path = %frontend_dist.display(), "Serving client bundle");
        Some(frontend_dist)
    } else {
        tracing::info!(path = %frontend_dist.display(), "Client bundle not found, serving API only");
        None
    };

    let app = build_router(state, frontend_dist);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
