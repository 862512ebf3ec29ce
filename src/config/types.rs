//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports a global config file, a project file and environment overrides.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::network;
use crate::types::{BlogError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Completion endpoint settings
    pub llm: LlmConfig,

    /// Export settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `BlogError::Config` on validation failure.
    ///
    /// A missing API key is not checked here so that `config show` and
    /// `theme` keep working without one; see [`GenerationSettings`].
    pub fn validate(&self) -> Result<()> {
        if self.llm.timeout_secs == 0 {
            return Err(BlogError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.llm.site_url).map_err(|e| {
            BlogError::Config(format!("Invalid site_url '{}': {}", self.llm.site_url, e))
        })?;

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

/// Completion request configuration
///
/// Endpoint and model are fixed ([`network::DEFAULT_ENDPOINT`],
/// [`network::DEFAULT_MODEL`]) and not configurable.
///
/// Note: the API key is never serialized to output and is redacted in
/// debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer credential
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Referrer URL sent in the `HTTP-Referer` header
    pub site_url: String,
    /// Application name sent in the `X-Title` header
    pub site_name: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            site_url: network::DEFAULT_SITE_URL.to_string(),
            site_name: network::DEFAULT_SITE_NAME.to_string(),
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory downloads are written to
    pub download_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("."),
        }
    }
}

// =============================================================================
// Generation Settings
// =============================================================================

/// Validated, immutable settings handed to the completion client at startup.
///
/// Construction fails fast when the API key is absent, so a missing
/// credential is reported once instead of on every request.
#[derive(Clone)]
pub struct GenerationSettings {
    pub api_key: SecretString,
    pub endpoint: String,
    pub model: String,
    pub site_url: String,
    pub site_name: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSettings")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let api_key = config
            .llm
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                BlogError::Config(
                    "API key not found. Set API_KEY (or BLOGWRITER_LLM__API_KEY) or add it to the config file"
                        .to_string(),
                )
            })?;

        Ok(Self {
            api_key: SecretString::from(api_key.to_string()),
            endpoint: network::DEFAULT_ENDPOINT.to_string(),
            model: network::DEFAULT_MODEL.to_string(),
            site_url: config.llm.site_url.clone(),
            site_name: config.llm.site_name.clone(),
            timeout: Duration::from_secs(config.llm.timeout_secs),
        })
    }

    /// `Authorization` header value
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}
