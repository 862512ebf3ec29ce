//! Request Timeout
//!
//! Wraps the completion call in a deadline so a stalled endpoint surfaces as
//! a distinct, retryable [`BlogError::Timeout`] rather than hanging forever.
//!
//! ## Usage
//!
//! ```ignore
//! use blogwriter::ai::timeout::with_timeout;
//!
//! let text = with_timeout(
//!     Duration::from_secs(60),
//!     client.generate(&prompt),
//!     "completion request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{BlogError, Result};

/// Execute an async operation with a timeout
///
/// Returns [`BlogError::Timeout`] if the operation doesn't complete within
/// `timeout`. The inner future is dropped, which cancels the request.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(BlogError::timeout(operation_name, timeout)),
    }
}
