//! Credentials and the monitoring-server session token.

use std::fmt;

use serde::Deserialize;

use crate::error::{DashError, ValidationError};

/// A username/password pair submitted on the login page.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Validation`] when the username or the password
    /// is empty.
    pub fn validate(&self) -> Result<(), DashError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername.into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session token issued by the monitoring server on login.
///
/// `Debug` never prints the value so the token cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token, rejecting empty strings.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
