//! # zabdash-domain
//!
//! Pure domain model for the zabdash monitoring dashboard.
//!
//! ## Responsibilities
//! - Foundational types: host identifiers, error conventions, timestamps
//! - Define **Devices** (monitored hosts with interfaces and group memberships)
//! - Define **Triggers** (alert conditions) and their ordinal **Severity**
//! - Map severity to an icon fill colour and group names to an icon asset
//! - Define the on-demand **Device Detail Record**
//! - Define credentials, the session token and the refresh interval
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod auth;
pub mod detail;
pub mod device;
pub mod icon;
pub mod settings;
pub mod severity;
pub mod trigger;
