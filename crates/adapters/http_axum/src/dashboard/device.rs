//! Device detail side panel and its document export.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use zabdash_app::export;
use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::error::DashError;

use super::{
    DashboardError, DashboardTemplate, DetailPanelTemplate, PanelView, load_snapshot,
    parse_host_id,
};
use crate::session::PageSession;
use crate::state::AppState;

/// `GET /devices/{hostid}` — the grid with the device's detail panel open.
///
/// A failed detail fetch still renders the page, with the panel saying the
/// details are unavailable.
pub async fn detail<M, I>(
    State(state): State<AppState<M, I>>,
    PageSession(token): PageSession,
    Path(hostid): Path<String>,
) -> Result<DashboardTemplate, DashboardError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let host_id = parse_host_id(&hostid)?;
    let snapshot = load_snapshot(&state, &token).await?;
    let triggers = snapshot
        .as_ref()
        .and_then(|snapshot| snapshot.card(&host_id))
        .and_then(|card| card.triggers.as_ref());

    let html = match state
        .device_service
        .detail_panel(&token, &host_id, triggers)
        .await
    {
        Ok(panel) => Some(DetailPanelTemplate::new(panel).render()?),
        Err(DashError::Unauthorized) => return Err(DashboardError::Unauthorized),
        Err(err) => {
            tracing::warn!(host_id = %host_id, error = %err, "failed to fetch device detail");
            None
        }
    };

    Ok(DashboardTemplate::new(
        state.poller.interval(),
        snapshot.as_deref(),
        Some(PanelView {
            host_id: host_id.to_string(),
            html,
        }),
    ))
}

/// `GET /devices/{hostid}/export` — the panel as a `DeviceData.doc` download.
pub async fn export<M, I>(
    State(state): State<AppState<M, I>>,
    PageSession(token): PageSession,
    Path(hostid): Path<String>,
) -> Result<Response, DashboardError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let host_id = parse_host_id(&hostid)?;
    let snapshot = load_snapshot(&state, &token).await?;
    let triggers = snapshot
        .as_ref()
        .and_then(|snapshot| snapshot.card(&host_id))
        .and_then(|card| card.triggers.as_ref());

    let panel = state
        .device_service
        .detail_panel(&token, &host_id, triggers)
        .await?;
    let html = DetailPanelTemplate::new(panel).render()?;
    tracing::info!(host_id = %host_id, "exporting device details");

    Ok((
        [
            (header::CONTENT_TYPE, export::CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::FILE_NAME),
            ),
        ],
        export::export_panel(&html),
    )
        .into_response())
}
