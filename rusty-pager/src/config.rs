//! Session configuration and end-of-life policy.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{PaginationError, Result};

/// Default idle timeout before a session closes itself.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(60_000);
/// Smallest idle timeout accepted.
pub const MIN_IDLE_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Action applied to the pagination message once the session closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndPolicy {
    /// Leave the message untouched.
    None,
    /// Delete the pagination message (or interaction reply).
    DeleteMessage,
    /// Re-render the current page without controls.
    DeleteButtons,
    /// Re-render the current page with every control disabled.
    #[default]
    DisableButtons,
}

impl EndPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            EndPolicy::None => "none",
            EndPolicy::DeleteMessage => "delete-message",
            EndPolicy::DeleteButtons => "delete-buttons",
            EndPolicy::DisableButtons => "disable-buttons",
        }
    }
}

impl FromStr for EndPolicy {
    type Err = PaginationError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Ok(EndPolicy::None),
            "delete-message" => Ok(EndPolicy::DeleteMessage),
            "delete-buttons" => Ok(EndPolicy::DeleteButtons),
            "disable-buttons" => Ok(EndPolicy::DisableButtons),
            other => Err(PaginationError::InvalidArgument(format!(
                "unknown end policy `{other}`"
            ))),
        }
    }
}

/// Tunables applied when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// When `false`, only the owner may drive the session.
    pub owner_independent: bool,
    /// Accepted activations before the listener closes; `None` is unlimited.
    pub max_activations: Option<usize>,
    pub idle_timeout: Duration,
    pub end_policy: EndPolicy,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            owner_independent: false,
            max_activations: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            end_policy: EndPolicy::default(),
        }
    }
}

impl PaginationConfig {
    /// Reject values the session cannot honor.
    pub fn validate(&self) -> Result<()> {
        validate_idle_timeout(self.idle_timeout)
    }
}

pub(crate) fn validate_idle_timeout(timeout: Duration) -> Result<()> {
    if timeout < MIN_IDLE_TIMEOUT {
        return Err(PaginationError::InvalidArgument(format!(
            "idle timeout must be at least {}ms, got {}ms",
            MIN_IDLE_TIMEOUT.as_millis(),
            timeout.as_millis()
        )));
    }

    Ok(())
}
