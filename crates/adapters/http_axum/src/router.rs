//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use zabdash_app::ports::{IconLibrary, MonitoringApi};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api`, dashboard routes at `/` and the icon
/// assets. Includes a [`TraceLayer`] that logs each HTTP request/response at
/// the `DEBUG` level using the `tracing` ecosystem.
pub fn build<M, I>(state: AppState<M, I>) -> Router
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .merge(crate::icons::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
