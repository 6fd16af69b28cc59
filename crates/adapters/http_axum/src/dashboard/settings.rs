//! Settings form handler.

use axum::extract::{Form, State};
use axum::response::Redirect;
use serde::Deserialize;

use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::settings::RefreshInterval;

use crate::session::PageSession;
use crate::state::AppState;

/// Form data for the settings form.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub refresh_interval: String,
}

/// `POST /settings` — change the polling interval (PRG).
///
/// Values that are not a positive whole number of seconds are ignored.
pub async fn update<M, I>(
    State(state): State<AppState<M, I>>,
    PageSession(_token): PageSession,
    Form(form): Form<SettingsForm>,
) -> Redirect
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    match RefreshInterval::parse(&form.refresh_interval) {
        Ok(interval) => state.poller.set_interval(interval),
        Err(err) => {
            tracing::debug!(value = %form.refresh_interval, error = %err, "ignoring refresh interval");
        }
    }
    Redirect::to("/")
}
