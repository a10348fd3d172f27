//! Platform share capability
//!
//! Sharing is optional: platforms without it simply provide no capability,
//! and callers check for it before use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content handed to the platform share sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    /// Share title
    pub title: String,
    /// Message body
    pub text: String,
    /// Link to the shared image
    pub url: String,
}

/// Errors reported by a share capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// User dismissed the share sheet
    #[error("share cancelled by user")]
    Cancelled,

    /// Platform refused the request
    #[error("share rejected: {0}")]
    Rejected(String),
}

/// Platform share sheet
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareCapability: Send + Sync {
    /// Present the share sheet and wait for it to close
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}
