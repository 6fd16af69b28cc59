//! User-adjustable dashboard settings.

use std::time::Duration;

use crate::error::ValidationError;

/// How often the device list is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshInterval(u32);

impl RefreshInterval {
    pub const DEFAULT_SECONDS: u32 = 30;

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRefreshInterval`] for zero.
    pub fn from_secs(seconds: u32) -> Result<Self, ValidationError> {
        if seconds == 0 {
            return Err(ValidationError::InvalidRefreshInterval);
        }
        Ok(Self(seconds))
    }

    /// Parse the value typed into the settings form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRefreshInterval`] when the input is
    /// not a whole number or is not positive.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let seconds: i64 = input
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidRefreshInterval)?;
        let seconds =
            u32::try_from(seconds).map_err(|_| ValidationError::InvalidRefreshInterval)?;
        Self::from_secs(seconds)
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(Self::DEFAULT_SECONDS)
    }
}
