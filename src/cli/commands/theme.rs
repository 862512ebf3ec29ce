//! Theme Command
//!
//! Usage:
//!   blogwriter theme [show]
//!   blogwriter theme toggle

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::theme::FilePreferenceStore;
use crate::types::Result;

/// Print the effective theme and where it is stored
pub fn show() -> Result<()> {
    let theme = CommandContext::load()?.theme()?;
    let output = Output::new(theme.is_dark());

    output.info(&format!("Theme: {}", theme.name()));
    if let Some(path) = FilePreferenceStore::default_path() {
        println!("  Stored in: {}", path.display());
    }
    Ok(())
}

/// Flip and persist the theme
pub fn toggle() -> Result<()> {
    let mut theme = CommandContext::load()?.theme()?;
    let dark = theme.toggle()?;
    Output::new(dark).success(&format!("Switched to {} mode", theme.name()));
    Ok(())
}
