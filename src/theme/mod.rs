//! Theme Preference
//!
//! A single dark/light flag persisted under the `theme` key.
//!
//! ## Resolution
//!
//! 1. Stored value (`"dark"` or `"light"`)
//! 2. System preference (terminal background from `COLORFGBG`)
//! 3. Light

mod store;

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use tracing::{debug, warn};

use crate::constants::theme::{DARK, LIGHT, THEME_KEY};
use crate::types::Result;

/// Dark-mode flag bound to a preference store
pub struct ThemePreference<S: PreferenceStore> {
    dark: bool,
    store: S,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Initialize from the store, falling back to the system preference
    pub fn load(store: S) -> Result<Self> {
        Self::load_with_system(store, system_prefers_dark())
    }

    /// Initialize with an explicit system preference, used when the store is
    /// empty, holds another value, or cannot be read
    pub fn load_with_system(store: S, system_dark: bool) -> Result<Self> {
        let stored = store.get(THEME_KEY).unwrap_or_else(|e| {
            warn!("Ignoring unreadable theme preference: {}", e);
            None
        });
        let dark = match stored.as_deref() {
            Some(DARK) => true,
            Some(LIGHT) => false,
            other => {
                debug!(
                    "No usable stored theme ({:?}), using system preference",
                    other
                );
                system_dark
            }
        };
        Ok(Self { dark, store })
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn name(&self) -> &'static str {
        if self.dark { DARK } else { LIGHT }
    }

    /// Flip the flag and persist it
    pub fn toggle(&mut self) -> Result<bool> {
        let next = !self.dark;
        self.store
            .set(THEME_KEY, if next { DARK } else { LIGHT })?;
        self.dark = next;
        debug!("Theme switched to {}", self.name());
        Ok(self.dark)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Detect a dark terminal background from `COLORFGBG` (`"fg;bg"`).
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_is_dark)
        .unwrap_or(false)
}

/// ANSI background indices 0-6 and 8 are dark; 7 and 9-15 are light.
fn background_is_dark(colorfgbg: &str) -> Option<bool> {
    let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
