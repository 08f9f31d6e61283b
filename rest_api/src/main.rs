// rest_api/src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use rest_api::{start_server, AppConfig, AppState};
use security::{AuthService, RegisteredClient, TokenService};
use store::Datastore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let store = match &config.snapshot_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading datastore snapshot");
            Datastore::open(path.clone()).context("failed to open datastore snapshot")?
        }
        None => Datastore::new(),
    };

    let tokens = Arc::new(TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl_minutes,
    ));
    let auth = Arc::new(AuthService::new(
        store.clone(),
        tokens,
        RegisteredClient {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        },
    ));
    let state = AppState { store, auth };

    // Held for the lifetime of the server; dropping it would trip the
    // shutdown select immediately.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    start_server(&config, state, shutdown_rx).await
}
