//! Zabbix connection configuration.

use std::fmt;

use serde::Deserialize;

/// Configuration for the Zabbix JSON-RPC client.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ZabbixConfig {
    /// Full URL of `api_jsonrpc.php`.
    pub url: String,
    /// HTTP basic-auth user for a proxy in front of the frontend.
    pub basic_auth_user: Option<String>,
    /// HTTP basic-auth password, used only with `basic_auth_user`.
    pub basic_auth_password: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ZabbixConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1/zabbix/api_jsonrpc.php".to_string(),
            basic_auth_user: None,
            basic_auth_password: None,
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for ZabbixConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZabbixConfig")
            .field("url", &self.url)
            .field("basic_auth_user", &self.basic_auth_user)
            .field(
                "basic_auth_password",
                &self.basic_auth_password.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
