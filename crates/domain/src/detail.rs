//! Device Detail Record — the richer, on-demand view of one device.

use serde::{Deserialize, Serialize};

/// Bytes per gibibyte.
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Detailed metrics for one host, fetched only when the user opens it.
///
/// Every field is optional: the server only reports the items the host's
/// template collects, and unparsable values are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    #[serde(rename = "hostid", skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_idle_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_swap_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_disk_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_disk_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_disk_space: Option<String>,
}

/// Format a byte count reported as text into gibibytes, e.g. `"3.75GB"`.
///
/// Returns `None` when the input is not a number.
#[must_use]
pub fn format_gib(bytes: &str) -> Option<String> {
    let bytes: f64 = bytes.trim().parse().ok()?;
    if !bytes.is_finite() {
        return None;
    }
    Some(format!("{:.2}GB", bytes / GIB))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_bytes_as_gib_with_two_decimals() {
        assert_eq!(format_gib("4026531840").as_deref(), Some("3.75GB"));
        assert_eq!(format_gib("0").as_deref(), Some("0.00GB"));
    }

    #[test]
    fn should_return_none_for_non_numeric_bytes() {
        assert_eq!(format_gib(""), None);
        assert_eq!(format_gib("lots"), None);
        assert_eq!(format_gib("inf"), None);
    }

    #[test]
    fn should_serialize_camel_case_and_skip_missing_fields() {
        let detail = DeviceDetail {
            host_name: Some("web-01".to_string()),
            cpu_idle_time: Some("97.5".to_string()),
            ..DeviceDetail::default()
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["hostName"], "web-01");
        assert_eq!(json["cpuIdleTime"], "97.5");
        assert!(json.get("totalMemory").is_none());
    }
}
