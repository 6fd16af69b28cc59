//! Auth service — exchange credentials for a monitoring session.

use std::sync::Arc;

use zabdash_domain::auth::{AuthToken, Credentials};
use zabdash_domain::error::DashError;

use crate::ports::MonitoringApi;

/// Application service for logging in to the monitoring server.
pub struct AuthService<M> {
    api: Arc<M>,
}

impl<M: MonitoringApi> AuthService<M> {
    /// Create a new service backed by the given monitoring API.
    pub fn new(api: Arc<M>) -> Self {
        Self { api }
    }

    /// Validate the credentials and log in.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Validation`] for an empty username or password,
    /// [`DashError::Unauthorized`] when the server rejects them, or an
    /// upstream error when the server cannot be reached.
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, DashError> {
        credentials.validate()?;
        let token = self.api.login(credentials).await?;
        tracing::info!("login succeeded");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use zabdash_domain::detail::DeviceDetail;
    use zabdash_domain::device::Device;
    use zabdash_domain::error::ValidationError;
    use zabdash_domain::id::HostId;
    use zabdash_domain::trigger::Trigger;

    #[derive(Default)]
    struct StubApi {
        calls: AtomicUsize,
    }

    impl MonitoringApi for StubApi {
        async fn login(&self, credentials: &Credentials) -> Result<AuthToken, DashError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if credentials.password == "zabbix" {
                Ok(AuthToken::new("token-1").unwrap())
            } else {
                Err(DashError::Unauthorized)
            }
        }
        async fn devices(&self, _token: &AuthToken) -> Result<Vec<Device>, DashError> {
            Ok(vec![])
        }
        async fn triggers(
            &self,
            _token: &AuthToken,
            _host_id: &HostId,
        ) -> Result<Vec<Trigger>, DashError> {
            Ok(vec![])
        }
        async fn device_detail(
            &self,
            _token: &AuthToken,
            _host_id: &HostId,
        ) -> Result<DeviceDetail, DashError> {
            Ok(DeviceDetail::default())
        }
    }

    #[tokio::test]
    async fn should_return_token_when_credentials_accepted() {
        let svc = AuthService::new(Arc::new(StubApi::default()));
        let token = svc
            .login(&Credentials::new("Admin", "zabbix"))
            .await
            .unwrap();
        assert_eq!(token.expose(), "token-1");
    }

    #[tokio::test]
    async fn should_propagate_unauthorized_when_credentials_rejected() {
        let svc = AuthService::new(Arc::new(StubApi::default()));
        let result = svc.login(&Credentials::new("Admin", "wrong")).await;
        assert!(matches!(result, Err(DashError::Unauthorized)));
    }

    #[tokio::test]
    async fn should_not_call_server_when_username_is_empty() {
        let api = Arc::new(StubApi::default());
        let svc = AuthService::new(Arc::clone(&api));
        let result = svc.login(&Credentials::new("", "zabbix")).await;
        assert!(matches!(
            result,
            Err(DashError::Validation(ValidationError::EmptyUsername))
        ));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }
}
