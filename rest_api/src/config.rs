// rest_api/src/config.rs

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server configuration, read once at startup from the environment (a
/// `.env` file is honored if present). Every knob has a development
/// default so a bare `cargo run` comes up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub access_token_ttl_minutes: i64,
    pub client_id: String,
    pub client_secret: String,
    /// Optional JSON snapshot file; when set the datastore loads from it
    /// at startup and rewrites it after every successful mutation.
    pub snapshot_path: Option<PathBuf>,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8082;
const DEFAULT_TTL_MINUTES: i64 = 30;

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HIMS_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("HIMS_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("HIMS_PORT is not a valid port: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let jwt_secret = env::var("HIMS_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("HIMS_JWT_SECRET not set, using the development secret");
            "dev-secret-change-me-before-deploying".to_string()
        });
        let access_token_ttl_minutes = match env::var("HIMS_ACCESS_TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("HIMS_ACCESS_TOKEN_TTL_MINUTES is not a number: {raw}"))?,
            Err(_) => DEFAULT_TTL_MINUTES,
        };
        let client_id = env::var("HIMS_CLIENT_ID").unwrap_or_else(|_| "chatbot".to_string());
        let client_secret =
            env::var("HIMS_CLIENT_SECRET").unwrap_or_else(|_| "chatbot-secret".to_string());
        let snapshot_path = env::var("HIMS_SNAPSHOT_PATH").ok().map(PathBuf::from);

        Ok(AppConfig {
            host,
            port,
            jwt_secret,
            access_token_ttl_minutes,
            client_id,
            client_secret,
            snapshot_path,
        })
    }
}
