//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`DashError`]
//! via `From` at the port boundary.

/// Top-level error shared by the domain, application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The monitoring server rejected the credentials or the session token.
    #[error("unauthorized")]
    Unauthorized,

    /// The monitoring server could not be reached or answered garbage.
    #[error("upstream error")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations on domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyId(&'static str),

    #[error("{kind} must be numeric, got {value:?}")]
    InvalidId { kind: &'static str, value: String },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("refresh interval must be a positive number of seconds")]
    InvalidRefreshInterval,
}
