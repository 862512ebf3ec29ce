//! Config Command
//!
//! Manage BlogWriter configuration.
//!
//! Usage:
//!   blogwriter config show [-f json]
//!   blogwriter config path
//!   blogwriter config init [--force]

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged effective configuration (API key omitted)
pub fn show(format: &str) -> Result<()> {
    ConfigLoader::show_config(format == "json")
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let dir = ConfigLoader::init_global(force)?;
    println!("✓ Initialized global configuration");
    println!("  Directory: {}", dir.display());
    if let Some(config_path) = ConfigLoader::global_config_path() {
        println!("  Config:    {}", config_path.display());
    }
    println!("\nSet API_KEY (or BLOGWRITER_LLM__API_KEY) before generating.");
    Ok(())
}
