//! Detail panel view model.
//!
//! Flattens a [`DeviceDetail`] and the card's stored active triggers into
//! display-ready rows. Missing values are shown as [`MISSING`].

use zabdash_domain::detail::DeviceDetail;
use zabdash_domain::id::HostId;
use zabdash_domain::trigger::TriggerSummary;

/// Fallback text for a field the server did not report.
pub const MISSING: &str = "N/A";

/// A labelled value in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// One active trigger as listed in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLine {
    pub description: String,
    pub severity: u8,
}

/// What the side panel shows for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub host_id: HostId,
    pub rows: Vec<DetailRow>,
    pub system_information: String,
    /// `None` when the device's triggers were never fetched successfully.
    pub triggers: Option<Vec<TriggerLine>>,
}

impl DetailPanel {
    #[must_use]
    pub fn new(host_id: HostId, detail: &DeviceDetail, triggers: Option<&TriggerSummary>) -> Self {
        let or_missing = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(MISSING)
                .to_string()
        };

        let rows = vec![
            DetailRow {
                label: "Host name",
                value: or_missing(&detail.host_name),
            },
            DetailRow {
                label: "Available memory",
                value: or_missing(&detail.available_memory),
            },
            DetailRow {
                label: "CPU idle time",
                value: or_missing(&detail.cpu_idle_time),
            },
            DetailRow {
                label: "Free disk space",
                value: or_missing(&detail.free_disk_space),
            },
            DetailRow {
                label: "Total memory",
                value: or_missing(&detail.total_memory),
            },
            DetailRow {
                label: "Total swap space",
                value: or_missing(&detail.total_swap_space),
            },
            DetailRow {
                label: "Used disk space",
                value: or_missing(&detail.used_disk_space),
            },
            DetailRow {
                label: "Total disk space",
                value: or_missing(&detail.total_disk_space),
            },
        ];

        let host = detail.host.as_deref().or(detail.host_name.as_deref());
        let triggers = triggers.map(|summary| {
            summary
                .active
                .iter()
                .map(|trigger| TriggerLine {
                    description: match host {
                        Some(host) => trigger.description_for(host),
                        None => trigger.description.clone(),
                    },
                    severity: trigger.severity.level(),
                })
                .collect()
        });

        Self {
            host_id,
            rows,
            system_information: or_missing(&detail.system_information),
            triggers,
        }
    }
}
