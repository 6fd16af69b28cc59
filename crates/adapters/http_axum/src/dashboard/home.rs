//! Dashboard home page — the device grid.

use axum::extract::State;

use zabdash_app::ports::{IconLibrary, MonitoringApi};

use super::{DashboardError, DashboardTemplate, load_snapshot};
use crate::session::PageSession;
use crate::state::AppState;

/// `GET /` — device grid from the latest snapshot.
pub async fn index<M, I>(
    State(state): State<AppState<M, I>>,
    PageSession(token): PageSession,
) -> Result<DashboardTemplate, DashboardError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let snapshot = load_snapshot(&state, &token).await?;
    Ok(DashboardTemplate::new(
        state.poller.interval(),
        snapshot.as_deref(),
        None,
    ))
}
