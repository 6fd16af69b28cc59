//! Shared application state for axum handlers.

use std::sync::Arc;

use zabdash_app::poller::Poller;
use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_app::services::auth_service::AuthService;
use zabdash_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the monitoring API and icon library to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<M, I> {
    /// Login against the monitoring server.
    pub auth_service: Arc<AuthService<M>>,
    /// Device, trigger and detail lookups.
    pub device_service: Arc<DeviceService<M, I>>,
    /// Background poller owning the latest snapshot.
    pub poller: Arc<Poller<M, I>>,
}

impl<M, I> Clone for AppState<M, I> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            device_service: Arc::clone(&self.device_service),
            poller: Arc::clone(&self.poller),
        }
    }
}

impl<M, I> AppState<M, I>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The poller must be built on the same device service so that the
    /// dashboard and the background task agree on what they render.
    pub fn from_arcs(
        auth_service: Arc<AuthService<M>>,
        device_service: Arc<DeviceService<M, I>>,
        poller: Arc<Poller<M, I>>,
    ) -> Self {
        Self {
            auth_service,
            device_service,
            poller,
        }
    }
}
