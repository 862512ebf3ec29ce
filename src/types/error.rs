//! Unified Error Type System
//!
//! Centralized error type for the whole crate, plus a coarse [`ErrorKind`]
//! classification the session controller uses to tag its error slot.
//!
//! ## Error Kinds
//!
//! - **Validation**: empty topic, rejected locally (no network call)
//! - **Configuration**: missing API key, unknown tone, bad site URL
//! - **Request**: non-success status or transport failure
//! - **Timeout**: completion call exceeded its deadline (retryable)
//! - **Clipboard** / **Download**: export primitives failed
//!
//! Every error renders to a short human-readable string. None of them are
//! retried automatically.

use std::time::Duration;
use thiserror::Error;

use crate::constants::messages;

// =============================================================================
// Error Kinds
// =============================================================================

/// Coarse error classification shown alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input rejected before any network call
    Validation,
    /// Missing or invalid configuration
    Configuration,
    /// Completion endpoint answered with a failure, or could not be reached
    Request,
    /// Completion call exceeded its deadline
    Timeout,
    /// Clipboard write failed
    Clipboard,
    /// File download failed
    Download,
    /// Theme preference store failed
    Preferences,
    /// Anything else (I/O, serialization)
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Request => write!(f, "REQUEST"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Clipboard => write!(f, "CLIPBOARD"),
            Self::Download => write!(f, "DOWNLOAD"),
            Self::Preferences => write!(f, "PREFERENCES"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorKind {
    /// Whether the user can reasonably try the same action again.
    ///
    /// Only timeouts qualify; a hard request failure or a configuration
    /// problem will fail the same way on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum BlogError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Completion request failed; `status` is absent for transport failures
    #[error("{message}")]
    Request {
        status: Option<u16>,
        message: String,
    },

    #[error("Request timed out after {}s: {operation}", .duration.as_secs())]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Export / Preference Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Clipboard(String),

    #[error("{0}")]
    Download(String),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

pub type Result<T> = std::result::Result<T, BlogError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl BlogError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Request failure with the fixed user-facing message
    pub fn request_failed(status: Option<u16>) -> Self {
        Self::Request {
            status,
            message: messages::REQUEST_FAILED.to_string(),
        }
    }

    /// Classify this error for display and retry hints
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Request { .. } => ErrorKind::Request,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Clipboard(_) => ErrorKind::Clipboard,
            Self::Download(_) => ErrorKind::Download,
            Self::Preferences(_) => ErrorKind::Preferences,
            Self::Io(_) | Self::Json(_) => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can be retried by the user)
    pub fn is_recoverable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Message shown to the user; never empty
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            messages::GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
