//! Boot failures surfaced to the landing page.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors that stop the redirect controller from starting.
///
/// Anything that goes wrong after boot is logged rather than returned.
pub enum RedirectError {
    /// The landing page inputs (user agent, location) could not be read.
    #[error("page context unavailable: {0}")]
    PageContext(String),
    /// The configuration failed validation.
    #[error("invalid redirect config: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A boot-time timer could not be scheduled.
    #[error("timer scheduling failed: {0}")]
    Scheduler(String),
}
