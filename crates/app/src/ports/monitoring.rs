//! Monitoring port — everything the dashboard needs from the monitoring server.

use std::future::Future;

use zabdash_domain::auth::{AuthToken, Credentials};
use zabdash_domain::detail::DeviceDetail;
use zabdash_domain::device::Device;
use zabdash_domain::error::DashError;
use zabdash_domain::id::HostId;
use zabdash_domain::trigger::Trigger;

/// Read access to a monitoring server, authenticated by a session token.
///
/// Implementations map transport and protocol failures to
/// [`DashError::Upstream`] and rejected sessions or credentials to
/// [`DashError::Unauthorized`].
pub trait MonitoringApi: Send + Sync {
    /// Exchange credentials for a session token.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthToken, DashError>> + Send;

    /// List every host visible to the session, with interfaces and groups.
    fn devices(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<Vec<Device>, DashError>> + Send;

    /// Triggers currently in problem state for one host.
    ///
    /// A host without problems yields an empty list, never an error.
    fn triggers(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> impl Future<Output = Result<Vec<Trigger>, DashError>> + Send;

    /// Memory, CPU, disk and system information for one host.
    fn device_detail(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> impl Future<Output = Result<DeviceDetail, DashError>> + Send;
}
