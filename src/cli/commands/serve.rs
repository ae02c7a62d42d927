use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::auth::{JwksFetcher, KeySource, StaticKeySet, TokenVerifier};
use crate::config::{AppConfig, AuthConfig};
use crate::database::{DatabaseManager, PgStore};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting casting agency API in {:?} mode", config.environment);

    // Connections open on first use, so the server can come up before the database
    let pool = DatabaseManager::connect_lazy(&config.database).context("invalid DATABASE_URL")?;
    if config.database.auto_create {
        DatabaseManager::ensure_schema(&pool)
            .await
            .context("failed to create tables")?;
    }

    let verifier = TokenVerifier::new(&config.auth, key_source(&config.auth)?);

    let state = AppState::new(Arc::new(PgStore::new(pool.clone())), Arc::new(verifier));
    let app = crate::app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Casting agency API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

/// Pinned keys from `AUTH_JWKS_FILE` when configured, else the provider's JWKS.
fn key_source(auth: &AuthConfig) -> anyhow::Result<Arc<dyn KeySource>> {
    if let Some(path) = &auth.jwks_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read AUTH_JWKS_FILE {}", path))?;
        let keys = StaticKeySet::from_json(&json)
            .with_context(|| format!("invalid JWKS document in {}", path))?;
        tracing::info!("Verifying tokens against {} pinned key(s) from {}", keys.0.keys.len(), path);
        return Ok(Arc::new(keys));
    }

    let keys = JwksFetcher::new(auth.jwks_url());
    tracing::info!("Verifying tokens against {}", keys.url());
    Ok(Arc::new(keys))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
