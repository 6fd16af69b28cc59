//! Snapshot — the full set of rendered device cards from one poll.

use zabdash_domain::auth::AuthToken;
use zabdash_domain::device::Device;
use zabdash_domain::icon::IconKind;
use zabdash_domain::id::HostId;
use zabdash_domain::severity::FillColor;
use zabdash_domain::time::Timestamp;
use zabdash_domain::trigger::TriggerSummary;

/// An icon ready to be inlined into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    pub kind: IconKind,
    pub fill: FillColor,
    /// Recoloured SVG markup.
    pub svg: String,
}

/// One device as shown on the dashboard.
///
/// `triggers` is `None` when the trigger fetch failed; `icon` is `None` when
/// either the triggers or the icon could not be produced.
#[derive(Debug, Clone)]
pub struct DeviceCard {
    pub device: Device,
    pub triggers: Option<TriggerSummary>,
    pub icon: Option<RenderedIcon>,
}

impl DeviceCard {
    #[must_use]
    pub fn host_id(&self) -> &HostId {
        &self.device.id
    }
}

/// The result of one complete poll, replaced wholesale by the next one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Session the snapshot was taken with.
    pub token: AuthToken,
    pub taken_at: Timestamp,
    pub cards: Vec<DeviceCard>,
}

impl Snapshot {
    #[must_use]
    pub fn card(&self, host_id: &HostId) -> Option<&DeviceCard> {
        self.cards.iter().find(|card| card.host_id() == host_id)
    }

    #[must_use]
    pub fn is_for(&self, token: &AuthToken) -> bool {
        &self.token == token
    }
}
