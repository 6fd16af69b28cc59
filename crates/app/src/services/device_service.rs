//! Device service — fetch devices and turn them into coloured cards.

use std::sync::Arc;

use futures::future::join_all;

use zabdash_domain::auth::AuthToken;
use zabdash_domain::detail::DeviceDetail;
use zabdash_domain::device::Device;
use zabdash_domain::error::DashError;
use zabdash_domain::id::HostId;
use zabdash_domain::time;
use zabdash_domain::trigger::{Trigger, TriggerSummary};

use crate::detail_panel::DetailPanel;
use crate::icon_render;
use crate::ports::{IconLibrary, MonitoringApi};
use crate::snapshot::{DeviceCard, RenderedIcon, Snapshot};

/// Application service for device listing, card rendering and detail panels.
pub struct DeviceService<M, I> {
    api: Arc<M>,
    icons: I,
}

impl<M: MonitoringApi, I: IconLibrary> DeviceService<M, I> {
    /// Create a new service backed by the given monitoring API and icon set.
    pub fn new(api: Arc<M>, icons: I) -> Self {
        Self { api, icons }
    }

    /// List every device visible to the session.
    ///
    /// # Errors
    ///
    /// Propagates the monitoring API error.
    #[tracing::instrument(skip(self, token))]
    pub async fn list_devices(&self, token: &AuthToken) -> Result<Vec<Device>, DashError> {
        self.api.devices(token).await
    }

    /// Triggers in problem state for one device.
    ///
    /// # Errors
    ///
    /// Propagates the monitoring API error.
    #[tracing::instrument(skip(self, token), fields(host_id = %host_id))]
    pub async fn list_triggers(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> Result<Vec<Trigger>, DashError> {
        self.api.triggers(token, host_id).await
    }

    /// Detail record for one device.
    ///
    /// # Errors
    ///
    /// Propagates the monitoring API error.
    #[tracing::instrument(skip(self, token), fields(host_id = %host_id))]
    pub async fn device_detail(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> Result<DeviceDetail, DashError> {
        self.api.device_detail(token, host_id).await
    }

    /// Run one full fetch → transform → render pass.
    ///
    /// Per-device trigger fetches run concurrently. A device whose triggers
    /// or icon fail keeps its card without an icon; only a failed device
    /// list fails the whole pass.
    ///
    /// # Errors
    ///
    /// Propagates the monitoring API error from the device list fetch.
    #[tracing::instrument(skip(self, token))]
    pub async fn snapshot(&self, token: &AuthToken) -> Result<Snapshot, DashError> {
        let devices = self.api.devices(token).await?;
        let cards = join_all(
            devices
                .into_iter()
                .map(|device| self.render_card(token, device)),
        )
        .await;

        let rendered = cards.iter().filter(|card| card.icon.is_some()).count();
        tracing::debug!(devices = cards.len(), rendered, "snapshot built");

        Ok(Snapshot {
            token: token.clone(),
            taken_at: time::now(),
            cards,
        })
    }

    /// Fetch one device's triggers and render its icon.
    pub async fn render_card(&self, token: &AuthToken, device: Device) -> DeviceCard {
        let triggers = match self.api.triggers(token, &device.id).await {
            Ok(triggers) => Some(TriggerSummary::from_triggers(triggers)),
            Err(err) => {
                tracing::warn!(host_id = %device.id, error = %err, "failed to fetch device triggers");
                None
            }
        };
        let icon = triggers
            .as_ref()
            .and_then(|summary| self.render_icon(&device, summary));

        DeviceCard {
            device,
            triggers,
            icon,
        }
    }

    /// Pick the device's icon and paint it by its worst trigger.
    ///
    /// Returns `None` (after logging) when the asset is missing or malformed.
    pub fn render_icon(&self, device: &Device, summary: &TriggerSummary) -> Option<RenderedIcon> {
        let kind = device.icon_kind();
        let fill = summary.fill();
        let Some(svg) = self.icons.svg(kind) else {
            tracing::warn!(host_id = %device.id, icon = %kind, "icon asset not found");
            return None;
        };
        match icon_render::colorize(svg, fill) {
            Ok(svg) => Some(RenderedIcon { kind, fill, svg }),
            Err(err) => {
                tracing::warn!(host_id = %device.id, icon = %kind, error = %err, "failed to render icon");
                None
            }
        }
    }

    /// Fetch the detail record and combine it with the card's active triggers.
    ///
    /// # Errors
    ///
    /// Propagates the monitoring API error from the detail fetch.
    #[tracing::instrument(skip(self, token, triggers), fields(host_id = %host_id))]
    pub async fn detail_panel(
        &self,
        token: &AuthToken,
        host_id: &HostId,
        triggers: Option<&TriggerSummary>,
    ) -> Result<DetailPanel, DashError> {
        let detail = self.api.device_detail(token, host_id).await?;
        Ok(DetailPanel::new(host_id.clone(), &detail, triggers))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use zabdash_domain::auth::Credentials;
    use zabdash_domain::device::HostGroup;
    use zabdash_domain::icon::IconKind;
    use zabdash_domain::id::TriggerId;
    use zabdash_domain::severity::{FillColor, Severity};
    use zabdash_domain::trigger::TriggerStatus;

    pub(crate) const ICON: &str =
        r#"<svg viewBox="0 0 10 10"><rect class="bg" width="10" height="10"/></svg>"#;

    #[derive(Default)]
    pub(crate) struct StubApi {
        pub devices: Mutex<Vec<Device>>,
        pub triggers: Mutex<HashMap<HostId, Vec<Trigger>>>,
        pub failing_hosts: Mutex<HashSet<HostId>>,
        pub fail_devices: AtomicBool,
        pub reject_session: AtomicBool,
        pub stall_devices: AtomicBool,
        pub device_calls: AtomicUsize,
    }

    impl MonitoringApi for StubApi {
        async fn login(&self, _credentials: &Credentials) -> Result<AuthToken, DashError> {
            Ok(token())
        }
        async fn devices(&self, _token: &AuthToken) -> Result<Vec<Device>, DashError> {
            self.device_calls.fetch_add(1, Ordering::SeqCst);
            if self.stall_devices.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.reject_session.load(Ordering::SeqCst) {
                return Err(DashError::Unauthorized);
            }
            if self.fail_devices.load(Ordering::SeqCst) {
                return Err(DashError::Upstream("connection refused".into()));
            }
            Ok(self.devices.lock().unwrap().clone())
        }
        async fn triggers(
            &self,
            _token: &AuthToken,
            host_id: &HostId,
        ) -> Result<Vec<Trigger>, DashError> {
            if self.failing_hosts.lock().unwrap().contains(host_id) {
                return Err(DashError::Upstream("timeout".into()));
            }
            Ok(self
                .triggers
                .lock()
                .unwrap()
                .get(host_id)
                .cloned()
                .unwrap_or_default())
        }
        async fn device_detail(
            &self,
            _token: &AuthToken,
            host_id: &HostId,
        ) -> Result<DeviceDetail, DashError> {
            Ok(DeviceDetail {
                host_id: Some(host_id.to_string()),
                host: Some("web-01".to_string()),
                ..DeviceDetail::default()
            })
        }
    }

    pub(crate) struct StubIcons {
        pub svg: Option<&'static str>,
    }

    impl IconLibrary for StubIcons {
        fn svg(&self, _kind: IconKind) -> Option<&str> {
            self.svg
        }
    }

    pub(crate) fn token() -> AuthToken {
        AuthToken::new("token-1").unwrap()
    }

    pub(crate) fn device(id: &str, group: &str) -> Device {
        Device {
            id: HostId::new(id).unwrap(),
            host: format!("host-{id}"),
            name: None,
            interfaces: vec![],
            groups: vec![HostGroup {
                id: "1".to_string(),
                name: group.to_string(),
            }],
        }
    }

    pub(crate) fn trigger(id: &str, severity: u8) -> Trigger {
        Trigger {
            id: TriggerId::new(id).unwrap(),
            description: "Problem on {HOST.NAME}".to_string(),
            severity: Severity::new(severity),
            status: TriggerStatus::Enabled,
            last_change: String::new(),
        }
    }

    fn make_service(api: Arc<StubApi>) -> DeviceService<StubApi, StubIcons> {
        DeviceService::new(api, StubIcons { svg: Some(ICON) })
    }

    #[tokio::test]
    async fn should_build_one_card_per_device_in_order() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "ARM"), device("2", "Switch")];
        let svc = make_service(api);

        let snapshot = svc.snapshot(&token()).await.unwrap();
        let ids: Vec<&str> = snapshot.cards.iter().map(|c| c.host_id().as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert!(snapshot.is_for(&token()));
    }

    #[tokio::test]
    async fn should_colour_icon_by_max_trigger_severity() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "ARM")];
        api.triggers.lock().unwrap().insert(
            HostId::new("1").unwrap(),
            vec![trigger("10", 2), trigger("11", 4)],
        );
        let svc = make_service(api);

        let snapshot = svc.snapshot(&token()).await.unwrap();
        let icon = snapshot.cards[0].icon.as_ref().unwrap();
        assert_eq!(icon.kind, IconKind::Pc);
        assert_eq!(icon.fill, FillColor::Red);
        assert!(icon.svg.contains("fill:#c05046"));
    }

    #[tokio::test]
    async fn should_render_green_default_icon_when_no_triggers() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "Printers")];
        let svc = make_service(api);

        let snapshot = svc.snapshot(&token()).await.unwrap();
        let card = &snapshot.cards[0];
        assert!(card.triggers.as_ref().unwrap().active.is_empty());
        let icon = card.icon.as_ref().unwrap();
        assert_eq!(icon.kind, IconKind::Default);
        assert_eq!(icon.fill, FillColor::Green);
    }

    #[tokio::test]
    async fn should_leave_only_failing_device_without_icon() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "ARM"), device("2", "ARM")];
        api.failing_hosts
            .lock()
            .unwrap()
            .insert(HostId::new("2").unwrap());
        let svc = make_service(api);

        let snapshot = svc.snapshot(&token()).await.unwrap();
        assert!(snapshot.cards[0].icon.is_some());
        assert!(snapshot.cards[1].icon.is_none());
        assert!(snapshot.cards[1].triggers.is_none());
    }

    #[tokio::test]
    async fn should_leave_icon_unrendered_when_asset_missing() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "ARM")];
        let svc = DeviceService::new(api, StubIcons { svg: None });

        let snapshot = svc.snapshot(&token()).await.unwrap();
        assert!(snapshot.cards[0].icon.is_none());
        assert!(snapshot.cards[0].triggers.is_some());
    }

    #[tokio::test]
    async fn should_leave_icon_unrendered_when_asset_malformed() {
        let api = Arc::new(StubApi::default());
        *api.devices.lock().unwrap() = vec![device("1", "ARM")];
        let svc = DeviceService::new(
            api,
            StubIcons {
                svg: Some("<g></g>"),
            },
        );

        let snapshot = svc.snapshot(&token()).await.unwrap();
        assert!(snapshot.cards[0].icon.is_none());
    }

    #[tokio::test]
    async fn should_fail_snapshot_when_device_list_fails() {
        let api = Arc::new(StubApi::default());
        api.fail_devices.store(true, Ordering::SeqCst);
        let svc = make_service(api);

        let result = svc.snapshot(&token()).await;
        assert!(matches!(result, Err(DashError::Upstream(_))));
    }

    #[tokio::test]
    async fn should_build_detail_panel_with_stored_triggers() {
        let api = Arc::new(StubApi::default());
        let svc = make_service(api);
        let summary = TriggerSummary::from_triggers(vec![trigger("10", 3)]);

        let panel = svc
            .detail_panel(&token(), &HostId::new("7").unwrap(), Some(&summary))
            .await
            .unwrap();
        assert_eq!(panel.host_id.as_str(), "7");
        let lines = panel.triggers.unwrap();
        assert_eq!(lines[0].description, "Problem on web-01");
    }
}
