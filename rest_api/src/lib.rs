use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;

use handlers::{appointments, auth, chatbot, departments, doctors, emrs, patients};

// Handler for the /v1/health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "hospital API is healthy" })),
    )
}

/// Builds the full application router over the injected state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/v1/health", get(health_check_handler))
        .route("/v1/patients", get(patients::list).post(patients::create))
        .route(
            "/v1/patients/:id",
            get(patients::fetch)
                .patch(patients::update)
                .delete(patients::remove),
        )
        .route("/v1/doctors", get(doctors::list).post(doctors::create))
        .route(
            "/v1/doctors/:id",
            get(doctors::fetch)
                .patch(doctors::update)
                .delete(doctors::remove),
        )
        .route(
            "/v1/departments",
            get(departments::list).post(departments::create),
        )
        .route(
            "/v1/departments/:id",
            get(departments::fetch)
                .patch(departments::update)
                .delete(departments::remove),
        )
        .route(
            "/v1/appointments",
            get(appointments::list).post(appointments::create),
        )
        .route(
            "/v1/appointments/:id",
            get(appointments::fetch)
                .patch(appointments::update)
                .delete(appointments::remove),
        )
        .route("/v1/emrs", get(emrs::list).post(emrs::create))
        .route(
            "/v1/emrs/:id",
            get(emrs::fetch).patch(emrs::update).delete(emrs::remove),
        )
        .route("/v1/auth/register", post(auth::register))
        .route("/v1/auth/token", post(auth::token))
        .route("/v1/auth/authorize", get(auth::authorize_page))
        .route("/v1/auth/authorize/login", post(auth::authorize_login))
        .route("/v1/auth/users/me", get(auth::me))
        .route(
            "/v1/chatbot/appointment",
            post(chatbot::book_appointment),
        )
        .route("/v1/chatbot/departments", get(chatbot::departments))
        .with_state(state)
        .layer(cors)
}

/// Runs the server until ctrl-c or the external shutdown signal fires.
pub async fn start_server(
    config: &AppConfig,
    state: AppState,
    shutdown_rx: oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let router = app(state);

    let shutdown_signal = async {
        tokio::select! {
            _ = shutdown_rx => {
                tracing::info!("received external shutdown signal");
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received ctrl-c");
            }
        }
    };

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "hospital API listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("server failed")?;

    tracing::info!("server stopped");
    Ok(())
}
