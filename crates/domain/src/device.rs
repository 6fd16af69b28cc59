//! Device — a monitored host as listed by the monitoring server.

use serde::{Deserialize, Serialize};

use crate::icon::IconKind;
use crate::id::HostId;

/// A network interface of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "interfaceid", default)]
    pub id: String,
    #[serde(default)]
    pub ip: String,
}

/// A host group the device belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    #[serde(rename = "groupid", default)]
    pub id: String,
    pub name: String,
}

/// A monitored host.
///
/// Fetched fresh on every poll; the identifier keys the device's card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "hostid")]
    pub id: HostId,
    /// Technical host name, used as the display name.
    pub host: String,
    /// Visible name, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    /// Zabbix 6.2+ names this `hostgroups`.
    #[serde(default, alias = "hostgroups")]
    pub groups: Vec<HostGroup>,
}

impl Device {
    /// Address of the first interface, if any.
    #[must_use]
    pub fn primary_ip(&self) -> Option<&str> {
        self.interfaces
            .first()
            .map(|iface| iface.ip.as_str())
            .filter(|ip| !ip.is_empty())
    }

    #[must_use]
    pub fn icon_kind(&self) -> IconKind {
        IconKind::from_group_names(self.groups.iter().map(|group| group.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_JSON: &str = r#"{
        "hostid": "10084",
        "host": "Zabbix server",
        "name": "Zabbix server",
        "interfaces": [{"interfaceid": "1", "ip": "127.0.0.1"}],
        "groups": [{"groupid": "4", "name": "Zabbix servers"}]
    }"#;

    #[test]
    fn should_deserialize_zabbix_host() {
        let device: Device = serde_json::from_str(HOST_JSON).unwrap();
        assert_eq!(device.id.as_str(), "10084");
        assert_eq!(device.host, "Zabbix server");
        assert_eq!(device.primary_ip(), Some("127.0.0.1"));
        assert_eq!(device.icon_kind(), IconKind::Server);
    }

    #[test]
    fn should_tolerate_missing_interfaces_and_groups() {
        let device: Device = serde_json::from_str(r#"{"hostid": "1", "host": "bare"}"#).unwrap();
        assert_eq!(device.primary_ip(), None);
        assert_eq!(device.icon_kind(), IconKind::Default);
    }

    #[test]
    fn should_render_default_icon_for_unknown_group() {
        let mut device: Device = serde_json::from_str(HOST_JSON).unwrap();
        device.groups = vec![HostGroup {
            id: "7".to_string(),
            name: "Printers".to_string(),
        }];
        assert_eq!(device.icon_kind(), IconKind::Default);
    }

    #[test]
    fn should_roundtrip_with_wire_field_names() {
        let device: Device = serde_json::from_str(HOST_JSON).unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["hostid"], "10084");
        assert_eq!(json["interfaces"][0]["ip"], "127.0.0.1");
        assert_eq!(json["groups"][0]["name"], "Zabbix servers");
    }
}
