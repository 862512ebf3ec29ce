//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/blogwriter/config.toml)
//! 3. Project config (.blogwriter.toml)
//! 4. Environment variables (BLOGWRITER_*, then API_KEY / SITE_URL / SITE_NAME)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
