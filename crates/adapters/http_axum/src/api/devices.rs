//! JSON handlers for devices and their triggers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::device::Device;
use zabdash_domain::trigger::Trigger;

use super::HostQuery;
use crate::error::ApiError;
use crate::session::ApiSession;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the triggers endpoint.
pub enum TriggersResponse {
    Ok(Json<Vec<Trigger>>),
}

impl IntoResponse for TriggersResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<M, I>(
    State(state): State<AppState<M, I>>,
    ApiSession(token): ApiSession,
) -> Result<ListResponse, ApiError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let devices = state.device_service.list_devices(&token).await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/triggers?hostid=ID`
///
/// A device without problems yields an empty array.
pub async fn triggers<M, I>(
    State(state): State<AppState<M, I>>,
    ApiSession(token): ApiSession,
    Query(query): Query<HostQuery>,
) -> Result<TriggersResponse, ApiError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let host_id = query.host_id()?;
    let triggers = state.device_service.list_triggers(&token, &host_id).await?;
    Ok(TriggersResponse::Ok(Json(triggers)))
}
