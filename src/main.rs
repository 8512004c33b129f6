#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        index::{get_healthz, get_index_route},
        wizard_steps::{
            internal_post_choice, internal_post_navigate, internal_post_submit,
            internal_post_team_size,
        },
    },
    state::RegistrationState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod notification;
mod routes;
mod state;
mod submission;
mod validation;
mod wizard;

//a full team of four with long free-text answers still fits comfortably
const MAX_BODY_BYTES: usize = 256 * 1024;

async fn shutdown_signal(state: RegistrationState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    state.sensible_shutdown().await;
}

fn router(state: RegistrationState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/healthz", get(get_healthz))
        .route("/internal/choice", post(internal_post_choice))
        .route("/internal/team_size", post(internal_post_team_size))
        .route("/internal/navigate", post(internal_post_navigate))
        .route("/internal/submit", post(internal_post_submit))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        //env vars can come from the environment directly
        eprintln!("not loading .env file: {e}");
    }

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = RegistrationState::new(config.clone())
        .await
        .expect("unable to create state");

    let server_ip = config.server_ip().to_string();
    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, event = config.event_name(), "Listening");
    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("unable to serve app");
}
