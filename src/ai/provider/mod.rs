//! Content Generator Abstraction
//!
//! Defines the [`ContentGenerator`] trait the session controller drives.
//! Exactly one production implementation exists ([`OpenRouterClient`]);
//! the trait is the seam for a provider-selection point should one ever be
//! needed, and for test doubles.

mod openrouter;

pub use openrouter::{OpenRouterClient, interpret_completion};

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::Result;

/// Shared generator type
pub type SharedGenerator = Arc<dyn ContentGenerator>;

/// Single-shot text generator
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Send `prompt` as a single-turn request and return the generated text.
    ///
    /// Exactly one outbound call, no retries, no streaming.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}
