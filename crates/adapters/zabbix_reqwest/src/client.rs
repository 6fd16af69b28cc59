//! Zabbix JSON-RPC client implementing the `MonitoringApi` port.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use zabdash_app::ports::MonitoringApi;
use zabdash_domain::auth::{AuthToken, Credentials};
use zabdash_domain::detail::DeviceDetail;
use zabdash_domain::device::Device;
use zabdash_domain::error::DashError;
use zabdash_domain::id::HostId;
use zabdash_domain::trigger::Trigger;

use crate::config::ZabbixConfig;
use crate::error::ZabbixError;
use crate::items::{DETAIL_KEYS, Item, detail_from_items};
use crate::rpc::{self, RpcRequest};

/// Longest slice of an error body kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

/// Client for a single Zabbix frontend.
///
/// Session tokens are passed per call; the client itself holds no session.
pub struct ZabbixClient {
    http: reqwest::Client,
    config: ZabbixConfig,
    request_id: AtomicU64,
}

impl ZabbixClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZabbixError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ZabbixConfig) -> Result<Self, ZabbixError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            request_id: AtomicU64::new(1),
        })
    }

    /// Endpoint this client talks to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }

    async fn call<P, T>(
        &self,
        method: &str,
        params: P,
        auth: Option<&AuthToken>,
    ) -> Result<Option<T>, ZabbixError>
    where
        P: Serialize + Send,
        T: DeserializeOwned,
    {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, auth.map(AuthToken::expose), id);

        let mut builder = self.http.post(&self.config.url).json(&request);
        if let Some(user) = &self.config.basic_auth_user {
            builder = builder.basic_auth(user, self.config.basic_auth_password.as_deref());
        }

        tracing::debug!(method, id, "calling Zabbix API");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let body: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(ZabbixError::Status {
                status: status.as_u16(),
                body,
            });
        }
        rpc::decode(&body)
    }
}

impl MonitoringApi for ZabbixClient {
    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, DashError> {
        let params = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let raw: String = self
            .call("user.login", params, None)
            .await
            .and_then(|result| result.ok_or(ZabbixError::MissingResult))
            .map_err(ZabbixError::into_login_error)?;
        AuthToken::new(raw).ok_or(DashError::Unauthorized)
    }

    async fn devices(&self, token: &AuthToken) -> Result<Vec<Device>, DashError> {
        let params = json!({
            "output": ["hostid", "host", "name"],
            "selectInterfaces": ["interfaceid", "ip"],
            "selectGroups": ["groupid", "name"],
        });
        let devices: Option<Vec<Device>> = self.call("host.get", params, Some(token)).await?;
        let devices = devices.unwrap_or_default();
        tracing::debug!(count = devices.len(), "fetched hosts");
        Ok(devices)
    }

    async fn triggers(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> Result<Vec<Trigger>, DashError> {
        let params = json!({
            "output": ["triggerid", "description", "priority", "status", "lastchange"],
            "hostids": host_id.as_str(),
            "filter": { "value": 1 },
        });
        let triggers: Option<Vec<Trigger>> = self.call("trigger.get", params, Some(token)).await?;
        Ok(triggers.unwrap_or_default())
    }

    async fn device_detail(
        &self,
        token: &AuthToken,
        host_id: &HostId,
    ) -> Result<DeviceDetail, DashError> {
        let params = json!({
            "output": ["itemid", "key_", "name", "lastvalue"],
            "hostids": host_id.as_str(),
            "filter": { "key_": DETAIL_KEYS },
            "sortfield": "key_",
        });
        let items: Option<Vec<Item>> = self.call("item.get", params, Some(token)).await?;
        Ok(detail_from_items(host_id, &items.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::post;
    use serde_json::Value;

    type Handler = fn(&HeaderMap, &Value) -> (StatusCode, String);

    /// Serve `handler` as a fake `api_jsonrpc.php` and return a client for it.
    async fn fake_zabbix(handler: Handler) -> ZabbixClient {
        let app = Router::new().route(
            "/api_jsonrpc.php",
            post(move |headers: HeaderMap, body: String| async move {
                let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                let (status, body) = handler(&headers, &request);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ZabbixClient::new(ZabbixConfig {
            url: format!("http://{addr}/api_jsonrpc.php"),
            timeout_secs: 5,
            ..ZabbixConfig::default()
        })
        .unwrap()
    }

    fn ok(result: &Value) -> (StatusCode, String) {
        (
            StatusCode::OK,
            json!({ "jsonrpc": "2.0", "result": result, "id": 1 }).to_string(),
        )
    }

    fn api_error(data: &str) -> (StatusCode, String) {
        (
            StatusCode::OK,
            json!({
                "jsonrpc": "2.0",
                "error": { "code": -32602, "message": "Invalid params.", "data": data },
                "id": 1,
            })
            .to_string(),
        )
    }

    fn token() -> AuthToken {
        AuthToken::new("0424bd59b807674191e7d77572075f33").unwrap()
    }

    #[tokio::test]
    async fn should_login_with_username_and_password() {
        let client = fake_zabbix(|_, req| {
            assert_eq!(req["method"], "user.login");
            assert_eq!(req["params"]["username"], "Admin");
            assert!(req.get("auth").is_none());
            if req["params"]["password"] == "zabbix" {
                ok(&json!("0424bd59b807674191e7d77572075f33"))
            } else {
                api_error("Incorrect user name or password or account is temporarily blocked.")
            }
        })
        .await;

        let token = client
            .login(&Credentials::new("Admin", "zabbix"))
            .await
            .unwrap();
        assert_eq!(token.expose(), "0424bd59b807674191e7d77572075f33");

        let err = client
            .login(&Credentials::new("Admin", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[tokio::test]
    async fn should_reject_blank_token_from_login() {
        let client = fake_zabbix(|_, _| ok(&json!(""))).await;
        let err = client
            .login(&Credentials::new("Admin", "zabbix"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[tokio::test]
    async fn should_fetch_devices_with_interfaces_and_groups() {
        let client = fake_zabbix(|_, req| {
            assert_eq!(req["method"], "host.get");
            assert_eq!(req["auth"], "0424bd59b807674191e7d77572075f33");
            assert!(req["params"]["selectInterfaces"].is_array());
            ok(&json!([{
                "hostid": "10084",
                "host": "Zabbix server",
                "name": "Zabbix server",
                "interfaces": [{ "interfaceid": "1", "ip": "127.0.0.1" }],
                "groups": [{ "groupid": "4", "name": "Zabbix servers" }],
            }]))
        })
        .await;

        let devices = client.devices(&token()).await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id.as_str(), "10084");
        assert_eq!(devices[0].primary_ip(), Some("127.0.0.1"));
        assert_eq!(devices[0].groups[0].name, "Zabbix servers");
    }

    #[tokio::test]
    async fn should_filter_triggers_to_problem_state() {
        let client = fake_zabbix(|_, req| {
            assert_eq!(req["method"], "trigger.get");
            assert_eq!(req["params"]["hostids"], "10084");
            assert_eq!(req["params"]["filter"]["value"], 1);
            ok(&json!([{
                "triggerid": "13491",
                "description": "High CPU on {HOST.NAME}",
                "priority": "4",
                "status": "0",
                "lastchange": "1700000000",
            }]))
        })
        .await;

        let triggers = client
            .triggers(&token(), &HostId::new("10084").unwrap())
            .await
            .unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].severity.level(), 4);
        assert!(triggers[0].is_active());
    }

    #[tokio::test]
    async fn should_treat_null_or_empty_trigger_result_as_no_triggers() {
        let host = HostId::new("10084").unwrap();

        let client = fake_zabbix(|_, _| ok(&Value::Null)).await;
        assert!(client.triggers(&token(), &host).await.unwrap().is_empty());

        let client = fake_zabbix(|_, _| (StatusCode::OK, String::new())).await;
        assert!(client.triggers(&token(), &host).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_request_detail_keys_and_map_items() {
        let client = fake_zabbix(|_, req| {
            assert_eq!(req["method"], "item.get");
            assert_eq!(req["params"]["sortfield"], "key_");
            let keys = req["params"]["filter"]["key_"].as_array().unwrap();
            assert!(keys.iter().any(|k| k == "vm.memory.size[total]"));
            ok(&json!([
                { "itemid": "1", "key_": "agent.hostname", "lastvalue": "web-01" },
                { "itemid": "2", "key_": "vm.memory.size[total]", "lastvalue": "8589934592" },
            ]))
        })
        .await;

        let detail = client
            .device_detail(&token(), &HostId::new("10084").unwrap())
            .await
            .unwrap();
        assert_eq!(detail.host_id.as_deref(), Some("10084"));
        assert_eq!(detail.host.as_deref(), Some("web-01"));
        assert_eq!(detail.total_memory.as_deref(), Some("8.00GB"));
    }

    #[tokio::test]
    async fn should_map_terminated_session_to_unauthorized() {
        let client = fake_zabbix(|_, _| api_error("Session terminated, re-login, please.")).await;
        let err = client.devices(&token()).await.unwrap_err();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[tokio::test]
    async fn should_map_http_failure_to_upstream() {
        let client =
            fake_zabbix(|_, _| (StatusCode::BAD_GATEWAY, "bad gateway".to_string())).await;
        let err = client.devices(&token()).await.unwrap_err();
        assert!(matches!(err, DashError::Upstream(_)));
    }

    #[tokio::test]
    async fn should_map_unreachable_server_to_upstream() {
        let client = ZabbixClient::new(ZabbixConfig {
            url: "http://127.0.0.1:1/api_jsonrpc.php".to_string(),
            timeout_secs: 1,
            ..ZabbixConfig::default()
        })
        .unwrap();
        let err = client.devices(&token()).await.unwrap_err();
        assert!(matches!(err, DashError::Upstream(_)));
    }

    #[tokio::test]
    async fn should_send_basic_auth_when_configured() {
        let client = fake_zabbix(|headers, _| {
            // "pamuser:secret"
            if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
                == Some("Basic cGFtdXNlcjpzZWNyZXQ=")
            {
                ok(&json!([]))
            } else {
                (StatusCode::UNAUTHORIZED, String::new())
            }
        })
        .await;
        let client = ZabbixClient::new(ZabbixConfig {
            url: client.url().to_string(),
            basic_auth_user: Some("pamuser".to_string()),
            basic_auth_password: Some("secret".to_string()),
            timeout_secs: 5,
        })
        .unwrap();

        assert!(client.devices(&token()).await.unwrap().is_empty());
    }
}
