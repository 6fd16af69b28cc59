//! # zabdash-adapter-zabbix-reqwest
//!
//! Driven adapter that implements the `MonitoringApi` port against a Zabbix
//! server's JSON-RPC endpoint (`api_jsonrpc.php`).
//!
//! ## Calls
//!
//! | Port operation | Zabbix method |
//! |----------------|---------------|
//! | `login` | `user.login` |
//! | `devices` | `host.get` with interfaces and groups |
//! | `triggers` | `trigger.get` filtered to problem state |
//! | `device_detail` | `item.get` filtered to memory, CPU, disk and uname keys |
//!
//! ## Dependency rule
//!
//! Depends on `zabdash-app` (port traits) and `zabdash-domain` only.

mod client;
mod config;
mod error;
mod items;
mod rpc;

pub use client::ZabbixClient;
pub use config::ZabbixConfig;
pub use error::ZabbixError;
pub use rpc::RpcError;
