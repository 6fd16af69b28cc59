//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! Pages render from the poller's latest snapshot. Visiting a page also
//! hands the session token to the poller, so the background loop follows
//! whoever used the dashboard last.

#[allow(clippy::missing_errors_doc)]
pub mod device;
#[allow(clippy::missing_errors_doc)]
pub mod home;
pub mod login;
pub mod settings;

use std::sync::Arc;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use zabdash_app::detail_panel::DetailPanel;
use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_app::snapshot::{DeviceCard, Snapshot};
use zabdash_domain::auth::AuthToken;
use zabdash_domain::error::DashError;
use zabdash_domain::id::HostId;
use zabdash_domain::settings::RefreshInterval;

use crate::session;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<M, I>() -> Router<AppState<M, I>>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    Router::new()
        .route("/", get(home::index::<M, I>))
        .route("/devices/{hostid}", get(device::detail::<M, I>))
        .route("/devices/{hostid}/export", get(device::export::<M, I>))
        .route("/settings", post(settings::update::<M, I>))
        .route("/login", get(login::page).post(login::submit::<M, I>))
        .route("/logout", post(login::logout))
}

/// Errors a dashboard page cannot degrade around.
#[derive(Debug)]
pub enum DashboardError {
    /// No usable session; the browser is sent back to `/login`.
    Unauthorized,
    BadRequest(String),
    Upstream,
    Render(askama::Error),
}

impl From<DashError> for DashboardError {
    fn from(err: DashError) -> Self {
        match err {
            DashError::Unauthorized => Self::Unauthorized,
            DashError::Validation(err) => Self::BadRequest(err.to_string()),
            DashError::Upstream(err) => {
                tracing::error!(error = %err, "monitoring server error");
                Self::Upstream
            }
        }
    }
}

impl From<askama::Error> for DashboardError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => return session::to_login(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Upstream => (
                StatusCode::BAD_GATEWAY,
                "Zabbix server unavailable".to_string(),
            ),
            Self::Render(err) => {
                tracing::error!(error = %err, "failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

/// Device grid page, optionally with the detail side panel open.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    cards: Vec<CardView>,
    updated_at: String,
    notice: Option<String>,
    panel: Option<PanelView>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

impl DashboardTemplate {
    fn new(interval: RefreshInterval, snapshot: Option<&Snapshot>, panel: Option<PanelView>) -> Self {
        let selected = panel.as_ref().map(|panel| panel.host_id.as_str());
        let cards = snapshot
            .map(|snapshot| {
                snapshot
                    .cards
                    .iter()
                    .map(|card| CardView::new(card, selected))
                    .collect()
            })
            .unwrap_or_default();
        let (updated_at, notice) = match snapshot {
            Some(snapshot) => (
                format!(
                    "Updated {}",
                    snapshot.taken_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None,
            ),
            None => (
                String::new(),
                Some("Device data is not available yet.".to_string()),
            ),
        };
        Self {
            refresh_seconds: interval.seconds(),
            cards,
            updated_at,
            notice,
            panel,
        }
    }
}

/// One device card in the grid.
pub struct CardView {
    host_id: String,
    name: String,
    ip: String,
    icon: Option<String>,
    status: String,
    selected: bool,
}

impl CardView {
    fn new(card: &DeviceCard, selected: Option<&str>) -> Self {
        let status = match &card.triggers {
            None => "Trigger data unavailable".to_string(),
            Some(summary) if summary.active.is_empty() => "No active triggers".to_string(),
            Some(summary) => format!(
                "{} active trigger(s), highest severity: {}",
                summary.active.len(),
                summary.max_severity.label()
            ),
        };
        let host_id = card.host_id().to_string();
        Self {
            selected: selected == Some(host_id.as_str()),
            host_id,
            name: card.device.host.clone(),
            ip: card.device.primary_ip().unwrap_or_default().to_string(),
            icon: card.icon.as_ref().map(|icon| icon.svg.clone()),
            status,
        }
    }
}

/// The open side panel.
pub struct PanelView {
    host_id: String,
    /// Rendered [`DetailPanelTemplate`], `None` when the detail fetch failed.
    html: Option<String>,
}

/// Body of the side panel; also the source of the export document.
#[derive(Template)]
#[template(path = "detail_panel.html")]
pub struct DetailPanelTemplate {
    panel: DetailPanel,
}

impl DetailPanelTemplate {
    #[must_use]
    pub fn new(panel: DetailPanel) -> Self {
        Self { panel }
    }
}

/// Latest snapshot for `token`, polling first when there is none yet.
///
/// A failed poll degrades to `None`; only a rejected session is an error.
async fn load_snapshot<M, I>(
    state: &AppState<M, I>,
    token: &AuthToken,
) -> Result<Option<Arc<Snapshot>>, DashboardError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    state.poller.follow_session(token);
    match state.poller.ensure_snapshot(token).await {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(DashError::Unauthorized) => Err(DashboardError::Unauthorized),
        Err(_) => Ok(None),
    }
}

/// Parse a `{hostid}` path segment.
fn parse_host_id(raw: &str) -> Result<HostId, DashboardError> {
    HostId::new(raw.trim()).map_err(|err| DashboardError::from(DashError::from(err)))
}
