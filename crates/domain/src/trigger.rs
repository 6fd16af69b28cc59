//! Trigger — an alert condition reported for a device.

use serde::{Deserialize, Serialize};

use crate::id::TriggerId;
use crate::severity::{FillColor, Severity};

/// Macro Zabbix leaves in trigger descriptions for the host name.
pub const HOST_NAME_MACRO: &str = "{HOST.NAME}";

/// Whether a trigger is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerStatus {
    #[serde(rename = "0")]
    Enabled,
    #[serde(rename = "1")]
    Disabled,
}

/// An alert condition attached to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "triggerid")]
    pub id: TriggerId,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "priority")]
    pub severity: Severity,
    pub status: TriggerStatus,
    /// Unix time of the last state change, as sent by the server.
    #[serde(rename = "lastchange", default)]
    pub last_change: String,
}

impl Trigger {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TriggerStatus::Enabled
    }

    /// Description with the host-name macro expanded.
    #[must_use]
    pub fn description_for(&self, host: &str) -> String {
        self.description.replacen(HOST_NAME_MACRO, host, 1)
    }
}

/// What a device card keeps about its triggers between two polls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TriggerSummary {
    /// Highest severity over every fetched trigger, active or not.
    pub max_severity: Severity,
    /// Enabled triggers, in the order the server returned them.
    pub active: Vec<Trigger>,
}

impl TriggerSummary {
    #[must_use]
    pub fn from_triggers(triggers: Vec<Trigger>) -> Self {
        let max_severity = triggers
            .iter()
            .map(|trigger| trigger.severity)
            .max()
            .unwrap_or(Severity::NONE);
        let active = triggers.into_iter().filter(Trigger::is_active).collect();
        Self {
            max_severity,
            active,
        }
    }

    #[must_use]
    pub fn fill(&self) -> FillColor {
        FillColor::for_severity(self.max_severity)
    }
}
