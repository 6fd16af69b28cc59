//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod deviceinfo;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::get;
use serde::Deserialize;

use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::error::{DashError, ValidationError};
use zabdash_domain::id::HostId;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<M, I>() -> Router<AppState<M, I>>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    Router::new()
        .route("/devices", get(devices::list::<M, I>))
        .route("/devices/triggers", get(devices::triggers::<M, I>))
        .route("/deviceinfo", get(deviceinfo::get::<M, I>))
}

/// `?hostid=` query parameter shared by the per-device endpoints.
#[derive(Debug, Deserialize)]
pub struct HostQuery {
    pub hostid: Option<String>,
}

impl HostQuery {
    /// Validate the parameter into a [`HostId`].
    ///
    /// # Errors
    ///
    /// Returns a validation error when the parameter is missing, blank or not
    /// numeric.
    pub fn host_id(self) -> Result<HostId, DashError> {
        let raw = self.hostid.ok_or(ValidationError::EmptyId(HostId::KIND))?;
        Ok(HostId::new(raw.trim())?)
    }
}
