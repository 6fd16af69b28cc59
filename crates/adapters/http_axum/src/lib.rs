//! # zabdash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** (`/api/devices`, `/api/devices/triggers`,
//!   `/api/deviceinfo`) authenticated with a Bearer token or the session cookie
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: the device grid, the detail side panel, the export
//!   download and the settings form
//! - Serve the embedded device icons
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML from the poller's
//!   latest snapshot.
//! - Login, logout and settings are `<form>` elements that POST back to the
//!   server and redirect (PRG pattern).
//! - The dashboard reloads itself with `<meta http-equiv="refresh">` at the
//!   current polling interval.
//!
//! ## Dependency rule
//! Depends on `zabdash-app` (for port traits and services) and
//! `zabdash-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod icons;
pub mod router;
pub mod session;
pub mod state;
