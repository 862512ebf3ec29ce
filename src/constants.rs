//! Global Constants
//!
//! Centralized constants for the completion endpoint, derived stats and
//! user-facing strings. All magic numbers should be defined here.

/// Completion endpoint constants
pub mod network {
    /// The single completion endpoint (OpenAI-compatible chat completions)
    pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

    /// Fixed model identifier sent with every request
    pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Referrer header identifying the calling site
    pub const REFERER_HEADER: &str = "HTTP-Referer";

    /// Application name header
    pub const TITLE_HEADER: &str = "X-Title";

    /// Default referrer URL
    pub const DEFAULT_SITE_URL: &str = "http://localhost:5173";

    /// Default application name
    pub const DEFAULT_SITE_NAME: &str = "My BlogWriter AI";
}

/// Generated-content constants
pub mod content {
    /// Word ceiling the prompt asks the model to respect
    pub const MAX_WORDS: usize = 250;

    /// Average reading speed used for the reading-time estimate
    pub const WORDS_PER_MINUTE: usize = 200;

    /// How long the "copied" confirmation stays visible (milliseconds)
    pub const COPY_CONFIRMATION_MS: u64 = 2000;
}

/// Theme persistence constants
pub mod theme {
    /// Key under which the theme is stored
    pub const THEME_KEY: &str = "theme";

    pub const DARK: &str = "dark";
    pub const LIGHT: &str = "light";

    /// Preferences file name inside the global config directory
    pub const PREFERENCES_FILE: &str = "preferences.toml";
}

/// User-facing messages
pub mod messages {
    pub const EMPTY_TOPIC: &str = "Please enter a blog topic";
    pub const REQUEST_FAILED: &str = "Failed to generate content";
    pub const NO_RESPONSE: &str = "No response from AI.";
    pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
    pub const CLIPBOARD_FAILED: &str = "Failed to copy to clipboard";
    pub const NOTHING_TO_COPY: &str = "Nothing to copy yet";
    pub const NOTHING_TO_DOWNLOAD: &str = "Nothing to download yet";
}
