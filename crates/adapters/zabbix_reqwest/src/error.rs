//! Zabbix adapter error types.

use zabdash_domain::error::DashError;

use crate::rpc::RpcError;

/// Errors specific to the Zabbix adapter.
#[derive(Debug, thiserror::Error)]
pub enum ZabbixError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("HTTP request to Zabbix failed")]
    Http(#[from] reqwest::Error),

    /// The frontend answered with a non-success HTTP status.
    #[error("Zabbix answered HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not a JSON-RPC response.
    #[error("failed to decode Zabbix response")]
    Decode(#[from] serde_json::Error),

    /// The API returned a JSON-RPC error object.
    #[error("Zabbix API error {}: {} {}", .0.code, .0.message, .0.data)]
    Api(RpcError),

    /// A call that must return a value returned none.
    #[error("Zabbix response has no result")]
    MissingResult,
}

impl ZabbixError {
    /// Convert into a [`DashError`] for propagation across port boundaries.
    ///
    /// Session rejections become [`DashError::Unauthorized`]; everything else
    /// is an upstream failure.
    pub fn into_domain(self) -> DashError {
        match self {
            Self::Api(ref rpc) if rpc.is_session_error() => DashError::Unauthorized,
            other => DashError::Upstream(Box::new(other)),
        }
    }

    /// Conversion used for `user.login`, where any API error means the
    /// credentials were refused.
    pub(crate) fn into_login_error(self) -> DashError {
        match self {
            Self::Api(_) => DashError::Unauthorized,
            other => other.into_domain(),
        }
    }
}

impl From<ZabbixError> for DashError {
    fn from(err: ZabbixError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(message: &str, data: &str) -> ZabbixError {
        ZabbixError::Api(RpcError {
            code: -32602,
            message: message.to_string(),
            data: data.to_string(),
        })
    }

    #[test]
    fn should_display_status_error() {
        let err = ZabbixError::Status {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Zabbix answered HTTP 502");
    }

    #[test]
    fn should_convert_session_error_to_unauthorized() {
        let err: DashError = api_error("Invalid params.", "Not authorised.").into();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[test]
    fn should_convert_other_api_error_to_upstream() {
        let err: DashError = api_error("Invalid params.", "No permissions.").into();
        assert!(matches!(err, DashError::Upstream(_)));
    }

    #[test]
    fn should_convert_missing_result_to_upstream() {
        let err: DashError = ZabbixError::MissingResult.into();
        assert!(matches!(err, DashError::Upstream(_)));
    }

    #[test]
    fn should_treat_any_api_error_on_login_as_unauthorized() {
        let err = api_error(
            "Application error.",
            "Incorrect user name or password or account is temporarily blocked.",
        )
        .into_login_error();
        assert!(matches!(err, DashError::Unauthorized));
    }

    #[test]
    fn should_keep_transport_error_on_login_as_upstream() {
        let err = ZabbixError::Status {
            status: 500,
            body: String::new(),
        }
        .into_login_error();
        assert!(matches!(err, DashError::Upstream(_)));
    }
}
