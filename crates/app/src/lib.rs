//! # zabdash-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `MonitoringApi` — login, host list, triggers, detail items
//!   - `IconLibrary` — the fixed set of SVG device icons
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AuthService` — exchange credentials for a session token
//!   - `DeviceService` — fetch devices, build coloured device cards, detail panels
//!   - `Poller` — re-run the fetch → transform → render pipeline on a timer
//! - Provide pure rendering helpers: SVG recolouring, detail-panel view model,
//!   document export
//!
//! ## Dependency rule
//! Depends on `zabdash-domain` only (plus `tokio::sync`/`tokio::time` for the
//! poller). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod detail_panel;
pub mod export;
pub mod icon_render;
pub mod poller;
pub mod ports;
pub mod services;
pub mod snapshot;
