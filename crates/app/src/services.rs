//! Application services — use-case orchestration.

pub mod auth_service;
pub mod device_service;
