//! BlogWriter - AI Blog Post Generator
//!
//! Turns a topic and a tone into a short blog post through one OpenRouter
//! chat completion, with a session controller that tracks the latest
//! attempt and exports its content.
//!
//! ## Quick Start
//!
//! ```ignore
//! use blogwriter::{ConfigLoader, GenerationSettings, OpenRouterClient, SessionController, Tone};
//!
//! let config = ConfigLoader::load()?;
//! let client = OpenRouterClient::new(GenerationSettings::from_config(&config)?)?;
//! let mut session = SessionController::new(theme);
//! session.set_topic("Remote work tips");
//! session.set_tone(Tone::Casual);
//! session.generate(&client).await;
//! println!("{}", session.content().unwrap_or_default());
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt construction and the completion client
//! - [`session`]: UI state controller and derived stats
//! - [`export`]: clipboard and file download
//! - [`theme`]: persisted dark/light preference
//! - [`config`]: Figment-based configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod session;
pub mod theme;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{Config, ConfigLoader, GenerationSettings};
pub use types::{BlogError, ErrorKind, Result};

pub use ai::{ContentGenerator, OpenRouterClient, SharedGenerator, Tone, build_prompt, with_timeout};
pub use session::{ContentStats, GenerationPhase, SessionController, UiError};
