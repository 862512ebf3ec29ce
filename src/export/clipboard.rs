//! Clipboard export over the OSC 52 terminal escape sequence.
//!
//! Works over SSH and inside multiplexers that pass OSC 52 through, with no
//! platform clipboard library.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use console::Term;
use tracing::{debug, warn};

use crate::constants::messages;
use crate::types::{BlogError, Result};

/// System clipboard sink
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by the controlling terminal
#[derive(Debug, Clone)]
pub struct Osc52Clipboard {
    term: Term,
}

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Escape sequence that asks the terminal to set the clipboard
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

impl Default for Osc52Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if !self.term.is_term() {
            warn!("Clipboard unavailable: stdout is not a terminal");
            return Err(BlogError::Clipboard(messages::CLIPBOARD_FAILED.to_string()));
        }

        debug!("Copying {} bytes via OSC 52", text.len());
        self.term
            .write_str(&Self::sequence(text))
            .and_then(|_| self.term.flush())
            .map_err(|e| {
                warn!("Clipboard write failed: {}", e);
                BlogError::Clipboard(messages::CLIPBOARD_FAILED.to_string())
            })
    }
}
