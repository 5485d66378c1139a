use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use viewstate::{ControllerArgs, ControllerFactory, ControllerRegistry};

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let factory = ControllerRegistry::with_defaults();
    check_root_controller(&factory, &settings.root_controller_type)?;

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    let state = AppState::new(factory, settings.root_controller_type);
    let app = build_router(Arc::new(state));

    info!(%addr, "view state server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds one root up front so an unknown or unbuildable root type stops
/// startup instead of surfacing on the first view state.
fn check_root_controller(factory: &ControllerRegistry, root_type: &str) -> anyhow::Result<()> {
    factory
        .init_controller(root_type, ControllerArgs::new())
        .with_context(|| {
            format!(
                "root controller type '{root_type}' cannot be built (known types: {:?})",
                factory.type_paths()
            )
        })?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/sessions", post(api::create_session))
        .route("/sessions/:session_id/view_states", post(api::view_state))
        .route(
            "/sessions/:session_id/view_states/:index/controllers/:path",
            get(api::get_controller)
                .put(api::insert_controller)
                .delete(api::pop_controller),
        )
        .route(
            "/sessions/:session_id/view_states/:index/controllers/:path/push",
            post(api::push_controller),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
