//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/blogwriter/config.toml)
//! 3. Project config (.blogwriter.toml)
//! 4. Environment variables (BLOGWRITER_ prefix, `__` for nesting)
//! 5. Bare `API_KEY`, `SITE_URL`, `SITE_NAME` variables

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{BlogError, Result};

/// Bare environment variables mapped into the `llm` table
const BARE_ENV_KEYS: [&str; 3] = ["API_KEY", "SITE_URL", "SITE_NAME"];

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        Self::extract(figment.merge(Self::env_providers()))
    }

    /// Load configuration from a specific file only (no environment)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    /// Environment layer: prefixed variables first, bare variables last
    fn env_providers() -> Figment {
        // BLOGWRITER_LLM__TIMEOUT_SECS -> llm.timeout_secs
        let prefixed = Env::prefixed("BLOGWRITER_").split("__");

        // API_KEY -> llm.api_key
        let bare = Env::raw()
            .only(&BARE_ENV_KEYS)
            .map(|key| format!("llm.{}", key.as_str().to_lowercase()).into());

        Figment::new().merge(prefixed).merge(bare)
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| BlogError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/blogwriter/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("blogwriter"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".blogwriter.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:      {} {}", exists, global.display());
        } else {
            println!("  Global:      (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project:     {} {}", exists, project.display());

        if let Some(prefs) = crate::theme::FilePreferenceStore::default_path() {
            let exists = if prefs.exists() { "✓" } else { "✗" };
            println!("  Preferences: {} {}", exists, prefs.display());
        }
    }

    /// Show current effective configuration (API key omitted)
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| BlogError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration; returns the global directory
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            BlogError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir)?;

        let config_path = global_dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_global_config())?;
            info!("Created global config: {}", config_path.display());
        } else {
            info!("Global config exists: {}", config_path.display());
        }

        Ok(global_dir)
    }

    /// Generate default global config content (TOML)
    fn default_global_config() -> String {
        r#"# BlogWriter Global Configuration
# Project settings in .blogwriter.toml override these.

version = "1.0"

[llm]
site_url = "http://localhost:5173"
site_name = "My BlogWriter AI"
timeout_secs = 60
# Prefer the API_KEY environment variable over storing the key here.
# api_key = ""

[output]
download_dir = "."
"#
        .to_string()
    }
}
