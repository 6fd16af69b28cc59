//! Mapping from Zabbix item keys to [`DeviceDetail`] fields.

use serde::Deserialize;

use zabdash_domain::detail::{DeviceDetail, format_gib};
use zabdash_domain::id::HostId;

/// Item keys requested for the detail view.
pub(crate) const DETAIL_KEYS: &[&str] = &[
    "system.hostname",
    "agent.hostname",
    "system.uname",
    "vm.memory.size[available]",
    "vm.memory.size[total]",
    "system.cpu.util[,idle]",
    "system.swap.size[,total]",
    "vfs.fs.size[/,free]",
    "vfs.fs.size[/,used]",
    "vfs.fs.size[/,total]",
];

/// One item row from `item.get`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Item {
    #[serde(rename = "key_")]
    pub key: String,
    #[serde(rename = "lastvalue", default)]
    pub last_value: String,
}

/// Fold item rows into a detail record.
///
/// Unknown keys are ignored. Byte-valued items whose value does not parse are
/// left unset.
pub(crate) fn detail_from_items(host_id: &HostId, items: &[Item]) -> DeviceDetail {
    let mut detail = DeviceDetail {
        host_id: Some(host_id.to_string()),
        ..DeviceDetail::default()
    };
    for item in items {
        let value = item.last_value.as_str();
        match item.key.as_str() {
            "system.hostname" => detail.host_name = Some(value.to_string()),
            "agent.hostname" => detail.host = Some(value.to_string()),
            "system.uname" => detail.system_information = Some(value.to_string()),
            "system.cpu.util[,idle]" => detail.cpu_idle_time = Some(value.to_string()),
            "vm.memory.size[available]" => detail.available_memory = gib(item),
            "vm.memory.size[total]" => detail.total_memory = gib(item),
            "system.swap.size[,total]" => detail.total_swap_space = gib(item),
            "vfs.fs.size[/,free]" => detail.free_disk_space = gib(item),
            "vfs.fs.size[/,used]" => detail.used_disk_space = gib(item),
            "vfs.fs.size[/,total]" => detail.total_disk_space = gib(item),
            _ => {}
        }
    }
    detail
}

fn gib(item: &Item) -> Option<String> {
    let formatted = format_gib(&item.last_value);
    if formatted.is_none() {
        tracing::debug!(key = %item.key, value = %item.last_value, "non-numeric byte value");
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, value: &str) -> Item {
        Item {
            key: key.to_string(),
            last_value: value.to_string(),
        }
    }

    #[test]
    fn should_map_text_items_verbatim() {
        let items = [
            item("system.hostname", "web-01.lan"),
            item("agent.hostname", "web-01"),
            item("system.uname", "Linux web-01 6.1.0"),
            item("system.cpu.util[,idle]", "97.5"),
        ];
        let detail = detail_from_items(&HostId::new("10084").unwrap(), &items);
        assert_eq!(detail.host_id.as_deref(), Some("10084"));
        assert_eq!(detail.host_name.as_deref(), Some("web-01.lan"));
        assert_eq!(detail.host.as_deref(), Some("web-01"));
        assert_eq!(
            detail.system_information.as_deref(),
            Some("Linux web-01 6.1.0")
        );
        assert_eq!(detail.cpu_idle_time.as_deref(), Some("97.5"));
    }

    #[test]
    fn should_format_byte_items_as_gib() {
        let items = [
            item("vm.memory.size[total]", "8589934592"),
            item("vm.memory.size[available]", "4026531840"),
            item("system.swap.size[,total]", "1073741824"),
            item("vfs.fs.size[/,free]", "0"),
            item("vfs.fs.size[/,used]", "536870912"),
            item("vfs.fs.size[/,total]", "536870912"),
        ];
        let detail = detail_from_items(&HostId::new("1").unwrap(), &items);
        assert_eq!(detail.total_memory.as_deref(), Some("8.00GB"));
        assert_eq!(detail.available_memory.as_deref(), Some("3.75GB"));
        assert_eq!(detail.total_swap_space.as_deref(), Some("1.00GB"));
        assert_eq!(detail.free_disk_space.as_deref(), Some("0.00GB"));
        assert_eq!(detail.used_disk_space.as_deref(), Some("0.50GB"));
        assert_eq!(detail.total_disk_space.as_deref(), Some("0.50GB"));
    }

    #[test]
    fn should_leave_unparsable_byte_values_unset() {
        let items = [item("vm.memory.size[total]", "")];
        let detail = detail_from_items(&HostId::new("1").unwrap(), &items);
        assert!(detail.total_memory.is_none());
    }

    #[test]
    fn should_ignore_unknown_keys() {
        let items = [item("net.if.in[eth0]", "123")];
        let detail = detail_from_items(&HostId::new("1").unwrap(), &items);
        assert_eq!(
            detail,
            DeviceDetail {
                host_id: Some("1".to_string()),
                ..DeviceDetail::default()
            }
        );
    }

    #[test]
    fn should_deserialize_item_row() {
        let json = r#"{"itemid":"1","key_":"system.uname","name":"System information","lastvalue":"Linux"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.key, "system.uname");
        assert_eq!(item.last_value, "Linux");
    }
}
