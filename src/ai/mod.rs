//! AI Integration Layer
//!
//! Prompt construction and the single completion call.

pub mod prompt;
pub mod provider;
pub mod timeout;

pub use prompt::{Tone, build_prompt};
pub use provider::{ContentGenerator, OpenRouterClient, SharedGenerator, interpret_completion};
pub use timeout::with_timeout;
