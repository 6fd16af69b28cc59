//! JSON-RPC envelopes for the Zabbix API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ZabbixError;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
    pub id: u64,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(method: &'a str, params: P, auth: Option<&'a str>, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            auth,
            id,
        }
    }
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// Error object returned by the Zabbix API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: String,
}

impl RpcError {
    /// Whether the server rejected the session rather than the request.
    #[must_use]
    pub fn is_session_error(&self) -> bool {
        let text = format!("{} {}", self.message, self.data).to_lowercase();
        text.contains("not authori") || text.contains("session terminated")
    }
}

/// Decode a response body into its `result`.
///
/// An empty body and a `null` or missing `result` both decode to `None`.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ZabbixError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let response: RpcResponse<T> = serde_json::from_slice(body)?;
    if let Some(error) = response.error {
        return Err(ZabbixError::Api(error));
    }
    Ok(response.result)
}
