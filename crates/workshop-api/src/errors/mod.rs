//! Error types and retry classification for the workshop API crate.
//!
//! This module provides:
//! - [`WorkshopApiError`]: The main error enum for all workshop API operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while talking to the workshop platform.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method, which the client's retry loop
/// uses to decide whether another attempt is worthwhile.
#[derive(Error, Debug)]
pub enum WorkshopApiError {
    /// The platform has no item with this id.
    #[error("Workshop item not found: {0}")]
    NotFound(String),

    /// The item exists but the platform refused to return it
    /// (private, banned, deleted). `result_code` is the platform's EResult.
    #[error("Workshop item {workshop_id} unavailable (result code {result_code})")]
    ItemUnavailable {
        workshop_id: String,
        result_code: i32,
    },

    /// The platform rate limited the request (HTTP 429).
    #[error("Rate limited by workshop platform")]
    RateLimited,

    /// The request timed out.
    #[error("Workshop request timed out: {endpoint}")]
    Timeout { endpoint: String },

    /// The API key was rejected (HTTP 401/403).
    #[error("Workshop API key rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success HTTP status.
    #[error("Workshop API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Invalid workshop API response: {0}")]
    InvalidResponse(String),

    /// A transport level failure (DNS, connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WorkshopApiError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use forgefleet_workshop_api::errors::{RetryClass, WorkshopApiError};
    ///
    /// assert_eq!(WorkshopApiError::RateLimited.retry_class(), RetryClass::WithBackoff);
    /// assert_eq!(
    ///     WorkshopApiError::NotFound("123".to_string()).retry_class(),
    ///     RetryClass::Never
    /// );
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::NotFound(_)
            | Self::ItemUnavailable { .. }
            | Self::Unauthorized { .. }
            | Self::InvalidResponse(_) => RetryClass::Never,

            Self::RateLimited | Self::Timeout { .. } => RetryClass::WithBackoff,

            Self::Http { status, .. } => {
                if *status >= 500 || *status == 408 {
                    RetryClass::WithBackoff
                } else {
                    RetryClass::Never
                }
            }

            Self::Network(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    RetryClass::WithBackoff
                } else {
                    RetryClass::Never
                }
            }
        }
    }

    /// True when another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        self.retry_class() == RetryClass::WithBackoff
    }
}
