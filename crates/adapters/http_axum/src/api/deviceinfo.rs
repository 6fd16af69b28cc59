//! JSON handler for the device detail record.

use axum::Json;
use axum::extract::{Query, State};

use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::detail::DeviceDetail;

use super::HostQuery;
use crate::error::ApiError;
use crate::session::ApiSession;
use crate::state::AppState;

/// `GET /api/deviceinfo?hostid=ID` — camelCase detail record.
pub async fn get<M, I>(
    State(state): State<AppState<M, I>>,
    ApiSession(token): ApiSession,
    Query(query): Query<HostQuery>,
) -> Result<Json<DeviceDetail>, ApiError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let host_id = query.host_id()?;
    let detail = state.device_service.device_detail(&token, &host_id).await?;
    Ok(Json(detail))
}
