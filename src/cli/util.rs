//! CLI Common Utilities
//!
//! Shared initialization for command handlers: configuration, theme,
//! session controller and the completion client.

use std::path::PathBuf;

use crate::ai::OpenRouterClient;
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader, GenerationSettings};
use crate::export::FileDownloader;
use crate::session::{SessionController, SessionTheme};
use crate::theme::{FilePreferenceStore, PreferenceStore, ThemePreference};
use crate::types::Result;

/// Command execution context
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Load configuration through the full resolution chain
    pub fn load() -> Result<Self> {
        Ok(Self {
            config: ConfigLoader::load()?,
        })
    }

    /// Theme backed by the preferences file in the global config directory
    pub fn theme(&self) -> Result<SessionTheme> {
        let store: Box<dyn PreferenceStore> = Box::new(FilePreferenceStore::open_default()?);
        ThemePreference::load(store)
    }

    /// Fresh session with the persisted theme applied
    pub fn session(&self) -> Result<SessionController> {
        Ok(SessionController::new(self.theme()?))
    }

    /// Completion client; fails with a configuration error when no API key is set
    pub fn generator(&self) -> Result<OpenRouterClient> {
        OpenRouterClient::new(GenerationSettings::from_config(&self.config)?)
    }

    /// Downloader targeting `dir`, or the configured download directory
    pub fn downloader(&self, dir: Option<PathBuf>) -> FileDownloader {
        FileDownloader::new(dir.unwrap_or_else(|| self.config.output.download_dir.clone()))
    }
}

/// Printer matching the session's theme
pub fn output_for(session: &SessionController) -> Output {
    Output::new(session.is_dark())
}

/// Print the outcome of the latest attempt: error slot, or content and stats
pub fn render_session(output: &Output, session: &SessionController) {
    if let Some(error) = session.error() {
        output.ui_error(error);
    }
    if let Some(content) = session.content() {
        output.content(content);
        output.stats(&session.stats());
    }
}
