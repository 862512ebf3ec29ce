//! Session Controller
//!
//! Owns topic, tone, content, loading and error state and sequences one
//! generation attempt at a time:
//!
//! ```text
//! Idle ─generate─▶ Validating ─ok─▶ Requesting ─▶ Succeeded
//!                       │                   └────▶ Failed
//!                       └─empty topic───────────▶ Failed
//! ```
//!
//! A generation is split into [`SessionController::begin_generation`] and
//! [`SessionController::complete_generation`] so the await point sits outside
//! the controller. Each attempt carries a sequence number; only the outcome
//! matching the latest issued number may touch content or error.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::stats::ContentStats;
use crate::ai::{ContentGenerator, Tone, build_prompt};
use crate::constants::{content::COPY_CONFIRMATION_MS, messages};
use crate::export::{Clipboard, Downloader, download_filename};
use crate::theme::{PreferenceStore, ThemePreference};
use crate::types::{BlogError, ErrorKind, Result};

/// Theme preference with a type-erased store
pub type SessionTheme = ThemePreference<Box<dyn PreferenceStore>>;

/// Where the current (or last) generation attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Validating,
    Requesting,
    Succeeded,
    Failed,
}

/// Error slot entry tagged with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl UiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&BlogError> for UiError {
    fn from(err: &BlogError) -> Self {
        Self::new(err.kind(), err.user_message())
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Handle for one in-flight generation attempt
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    seq: u64,
    prompt: String,
    topic: String,
}

impl GenerationTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Prompt built for this attempt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Trimmed topic this attempt was issued for
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// View-model for one writing session
pub struct SessionController {
    topic: String,
    tone: Tone,
    content: Option<String>,
    content_topic: Option<String>,
    loading: bool,
    error: Option<UiError>,
    phase: GenerationPhase,
    stats: ContentStats,
    seq: u64,
    copied_at: Option<Instant>,
    theme: SessionTheme,
}

impl SessionController {
    pub fn new(theme: SessionTheme) -> Self {
        Self {
            topic: String::new(),
            tone: Tone::default(),
            content: None,
            content_topic: None,
            loading: false,
            error: None,
            phase: GenerationPhase::Idle,
            stats: ContentStats::default(),
            seq: 0,
            copied_at: None,
            theme,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn stats(&self) -> ContentStats {
        self.stats
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Whether the "copied" confirmation is still showing at `now`
    pub fn copy_confirmed_at(&self, now: Instant) -> bool {
        self.copied_at.is_some_and(|at| {
            now.saturating_duration_since(at) < Duration::from_millis(COPY_CONFIRMATION_MS)
        })
    }

    pub fn copy_confirmed(&self) -> bool {
        self.copy_confirmed_at(Instant::now())
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    /// Flip and persist the theme; store failures land in the error slot
    pub fn toggle_theme(&mut self) -> bool {
        match self.theme.toggle() {
            Ok(_) => {
                if self.error.as_ref().is_some_and(|e| e.kind == ErrorKind::Preferences) {
                    self.error = None;
                }
            }
            Err(e) => {
                warn!("Theme toggle failed: {}", e);
                self.error = Some(UiError::from(&e));
            }
        }
        self.theme.is_dark()
    }

    /// Fail an attempt that could not reach the request stage (e.g. missing
    /// API key). Ignored while a request is in flight.
    pub fn report_error(&mut self, err: &BlogError) {
        if self.loading {
            debug!("Not reporting {} while a request is in flight", err.kind());
            return;
        }
        self.fail(err);
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Start an attempt.
    ///
    /// Returns `None` without touching state while another attempt is in
    /// flight. Returns `None` after moving to `Failed` when the trimmed topic
    /// is empty; no network call may follow. Otherwise clears content and
    /// error, sets loading and hands back the ticket to complete.
    pub fn begin_generation(&mut self) -> Option<GenerationTicket> {
        if self.loading {
            debug!("Generation already in flight (seq {}), ignoring", self.seq);
            return None;
        }

        self.phase = GenerationPhase::Validating;
        self.set_content(None, None);
        self.error = None;

        let topic = self.topic.trim();
        if topic.is_empty() {
            self.fail(&BlogError::Validation(messages::EMPTY_TOPIC.to_string()));
            return None;
        }

        self.seq += 1;
        self.loading = true;
        self.phase = GenerationPhase::Requesting;

        info!(
            "Generating (seq {}, tone {}) for topic: {}",
            self.seq, self.tone, topic
        );

        Some(GenerationTicket {
            seq: self.seq,
            prompt: build_prompt(topic, self.tone),
            topic: topic.to_string(),
        })
    }

    /// Apply the outcome of an attempt.
    ///
    /// Returns `false` and changes nothing when the ticket is stale (not the
    /// latest issued sequence number, or no attempt is in flight).
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: Result<String>,
    ) -> bool {
        if !self.loading || ticket.seq != self.seq {
            debug!(
                "Dropping stale generation result (seq {}, latest {})",
                ticket.seq, self.seq
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(text) => {
                self.set_content(Some(text), Some(ticket.topic));
                self.phase = GenerationPhase::Succeeded;
                debug!("Generation {} succeeded ({} words)", ticket.seq, self.stats.word_count);
            }
            Err(e) => self.fail(&e),
        }
        true
    }

    /// Run one full attempt against `generator`
    pub async fn generate(&mut self, generator: &dyn ContentGenerator) -> GenerationPhase {
        if let Some(ticket) = self.begin_generation() {
            let outcome = generator.generate(ticket.prompt()).await;
            self.complete_generation(ticket, outcome);
        }
        self.phase
    }

    fn fail(&mut self, err: &BlogError) {
        warn!("Generation failed [{}]: {}", err.kind(), err);
        self.error = Some(UiError::from(err));
        self.phase = GenerationPhase::Failed;
    }

    fn set_content(&mut self, content: Option<String>, topic: Option<String>) {
        self.stats = ContentStats::from_content(content.as_deref());
        self.content = content;
        self.content_topic = topic;
        self.copied_at = None;
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Copy the current content; returns whether it succeeded
    pub fn copy(&mut self, clipboard: &dyn Clipboard) -> bool {
        let Some(content) = self.content.as_deref() else {
            self.error = Some(UiError::new(ErrorKind::Clipboard, messages::NOTHING_TO_COPY));
            return false;
        };

        match clipboard.write_text(content) {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                if self.error.as_ref().is_some_and(|e| e.kind == ErrorKind::Clipboard) {
                    self.error = None;
                }
                true
            }
            Err(e) => {
                self.error = Some(UiError::from(&e));
                false
            }
        }
    }

    /// Save the current content as `blog-<topic>.txt`
    pub fn download(&mut self, downloader: &dyn Downloader) -> Option<PathBuf> {
        let (Some(content), Some(topic)) = (self.content.as_deref(), self.content_topic.as_deref())
        else {
            self.error = Some(UiError::new(ErrorKind::Download, messages::NOTHING_TO_DOWNLOAD));
            return None;
        };

        match downloader.save(&download_filename(topic), content) {
            Ok(path) => {
                if self.error.as_ref().is_some_and(|e| e.kind == ErrorKind::Download) {
                    self.error = None;
                }
                Some(path)
            }
            Err(e) => {
                self.error = Some(UiError::from(&e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryPreferenceStore;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn controller() -> SessionController {
        let store: Box<dyn PreferenceStore> = Box::new(MemoryPreferenceStore::new());
        SessionController::new(ThemePreference::load_with_system(store, false).unwrap())
    }

    /// Generator with a scripted outcome that counts calls
    struct MockGenerator {
        outcome: fn() -> Result<String>,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn new(outcome: fn() -> Result<String>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentGenerator for MockGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        fail: bool,
        written: RefCell<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(BlogError::Clipboard(messages::CLIPBOARD_FAILED.to_string()));
            }
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDownloader {
        fail: bool,
        saved: RefCell<Vec<(String, String)>>,
    }

    impl Downloader for RecordingDownloader {
        fn save(&self, filename: &str, content: &str) -> Result<PathBuf> {
            if self.fail {
                return Err(BlogError::Download("disk full".to_string()));
            }
            self.saved
                .borrow_mut()
                .push((filename.to_string(), content.to_string()));
            Ok(PathBuf::from(filename))
        }
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.tone(), Tone::Formal);
        assert_eq!(c.phase(), GenerationPhase::Idle);
        assert!(c.content().is_none());
        assert!(c.error().is_none());
        assert!(!c.is_loading());
        assert_eq!(c.stats(), ContentStats::default());
    }

    #[tokio::test]
    async fn test_empty_topic_never_calls_generator() {
        let generator = MockGenerator::new(|| Ok("unused".to_string()));
        let mut c = controller();

        for topic in ["", "   ", "\n\t "] {
            c.set_topic(topic);
            assert_eq!(c.generate(&generator).await, GenerationPhase::Failed);

            let err = c.error().unwrap();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, "Please enter a blog topic");
            assert!(!c.is_loading());
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_sets_content_and_stats() {
        let generator = MockGenerator::new(|| Ok("Hello world".to_string()));
        let mut c = controller();
        c.set_topic("  Greetings  ");

        assert_eq!(c.generate(&generator).await, GenerationPhase::Succeeded);
        assert_eq!(c.content(), Some("Hello world"));
        assert_eq!(c.stats().word_count, 2);
        assert_eq!(c.stats().reading_time, 1);
        assert!(c.error().is_none());
        assert!(!c.is_loading());
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_text_is_content() {
        let generator = MockGenerator::new(|| Ok(messages::NO_RESPONSE.to_string()));
        let mut c = controller();
        c.set_topic("Anything");

        c.generate(&generator).await;
        assert_eq!(c.content(), Some("No response from AI."));
        assert_eq!(c.phase(), GenerationPhase::Succeeded);
    }

    #[tokio::test]
    async fn test_request_failure_leaves_content_absent() {
        let generator = MockGenerator::new(|| Err(BlogError::request_failed(Some(500))));
        let mut c = controller();
        c.set_topic("Tea");

        assert_eq!(c.generate(&generator).await, GenerationPhase::Failed);
        assert!(c.content().is_none());
        let err = c.error().unwrap();
        assert_eq!(err.message, "Failed to generate content");
        assert_eq!(err.kind, ErrorKind::Request);
        assert_eq!(c.stats(), ContentStats::default());
    }

    #[tokio::test]
    async fn test_timeout_is_tagged() {
        let generator = MockGenerator::new(|| {
            Err(BlogError::timeout("completion request", Duration::from_secs(60)))
        });
        let mut c = controller();
        c.set_topic("Tea");

        c.generate(&generator).await;
        let err = c.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(err.kind.is_retryable());
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_state() {
        let ok = MockGenerator::new(|| Ok("First post".to_string()));
        let fail = MockGenerator::new(|| Err(BlogError::request_failed(Some(503))));
        let mut c = controller();
        c.set_topic("Tea");

        c.generate(&ok).await;
        assert!(c.content().is_some());

        let ticket = c.begin_generation().unwrap();
        assert!(c.content().is_none());
        assert!(c.error().is_none());
        assert!(c.is_loading());
        assert_eq!(c.phase(), GenerationPhase::Requesting);
        assert_eq!(c.stats(), ContentStats::default());

        c.complete_generation(ticket, fail.generate("p").await);
        assert!(c.error().is_some());

        c.generate(&ok).await;
        assert!(c.error().is_none());
        assert_eq!(c.content(), Some("First post"));
    }

    #[test]
    fn test_second_begin_while_in_flight_is_noop() {
        let mut c = controller();
        c.set_topic("Tea");

        let first = c.begin_generation().unwrap();
        assert!(c.begin_generation().is_none());
        assert!(c.is_loading());
        assert_eq!(c.phase(), GenerationPhase::Requesting);

        assert!(c.complete_generation(first, Ok("done".to_string())));
        assert_eq!(c.content(), Some("done"));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut c = controller();
        c.set_topic("Tea");

        let first = c.begin_generation().unwrap();
        let duplicate = first.clone();
        assert!(c.complete_generation(first, Ok("one".to_string())));

        // late duplicate delivery after completion
        assert!(!c.complete_generation(duplicate.clone(), Ok("dup".to_string())));
        assert_eq!(c.content(), Some("one"));

        // old ticket delivered while a newer attempt is in flight
        let second = c.begin_generation().unwrap();
        assert!(second.seq() > duplicate.seq());
        assert!(!c.complete_generation(duplicate, Err(BlogError::request_failed(None))));
        assert!(c.is_loading());
        assert!(c.error().is_none());

        assert!(c.complete_generation(second, Ok("two".to_string())));
        assert_eq!(c.content(), Some("two"));
    }

    #[test]
    fn test_ticket_carries_prompt_for_current_tone() {
        let mut c = controller();
        c.set_topic(" Rust ");
        c.set_tone(Tone::Seo);

        let ticket = c.begin_generation().unwrap();
        assert_eq!(ticket.topic(), "Rust");
        assert_eq!(ticket.prompt(), build_prompt("Rust", Tone::Seo));
    }

    #[tokio::test]
    async fn test_copy_success_and_confirmation_window() {
        let generator = MockGenerator::new(|| Ok("Copy me".to_string()));
        let clipboard = RecordingClipboard::default();
        let mut c = controller();
        c.set_topic("Tea");
        c.generate(&generator).await;

        assert!(c.copy(&clipboard));
        assert_eq!(clipboard.written.borrow().as_slice(), ["Copy me".to_string()]);

        let now = Instant::now();
        assert!(c.copy_confirmed_at(now));
        assert!(!c.copy_confirmed_at(now + Duration::from_millis(2500)));
    }

    #[tokio::test]
    async fn test_copy_failure_sets_clipboard_error() {
        let generator = MockGenerator::new(|| Ok("Copy me".to_string()));
        let clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let mut c = controller();
        c.set_topic("Tea");
        c.generate(&generator).await;

        assert!(!c.copy(&clipboard));
        let err = c.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Clipboard);
        assert_eq!(err.message, "Failed to copy to clipboard");
        assert!(!c.copy_confirmed());
        // content untouched
        assert_eq!(c.content(), Some("Copy me"));
    }

    #[test]
    fn test_copy_without_content() {
        let mut c = controller();
        assert!(!c.copy(&RecordingClipboard::default()));
        assert_eq!(c.error().unwrap().kind, ErrorKind::Clipboard);
    }

    #[tokio::test]
    async fn test_download_uses_generated_topic() {
        let generator = MockGenerator::new(|| Ok("Body text".to_string()));
        let downloader = RecordingDownloader::default();
        let mut c = controller();
        c.set_topic("My Great Topic!");
        c.generate(&generator).await;

        // editing the topic afterwards does not rename the download
        c.set_topic("Something else");
        let path = c.download(&downloader).unwrap();

        assert_eq!(path, PathBuf::from("blog-my-great-topic!.txt"));
        assert_eq!(
            downloader.saved.borrow()[0],
            ("blog-my-great-topic!.txt".to_string(), "Body text".to_string())
        );
    }

    #[tokio::test]
    async fn test_download_failure_sets_download_error() {
        let generator = MockGenerator::new(|| Ok("Body".to_string()));
        let downloader = RecordingDownloader {
            fail: true,
            ..Default::default()
        };
        let mut c = controller();
        c.set_topic("Tea");
        c.generate(&generator).await;

        assert!(c.download(&downloader).is_none());
        assert_eq!(c.error().unwrap().kind, ErrorKind::Download);
    }

    #[test]
    fn test_download_without_content() {
        let mut c = controller();
        assert!(c.download(&RecordingDownloader::default()).is_none());
        let err = c.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Download);
        assert_eq!(err.message, "Nothing to download yet");
    }

    #[test]
    fn test_theme_double_toggle() {
        let mut c = controller();
        let initial = c.is_dark();
        assert_eq!(c.toggle_theme(), !initial);
        assert_eq!(c.toggle_theme(), initial);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_report_configuration_error() {
        let mut c = controller();
        c.report_error(&BlogError::Config("API key not found".to_string()));
        let err = c.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("API key not found"));
        assert_eq!(c.phase(), GenerationPhase::Failed);
        assert!(!c.is_loading());
    }

    #[test]
    fn test_report_error_ignored_while_in_flight() {
        let mut c = controller();
        c.set_topic("Tea");
        let _ticket = c.begin_generation().unwrap();

        c.report_error(&BlogError::Config("API key not found".to_string()));
        assert_eq!(c.phase(), GenerationPhase::Requesting);
        assert!(c.error().is_none());
    }

    /// Store whose first `set` fails
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryPreferenceStore,
        failed_once: std::cell::Cell<bool>,
    }

    impl PreferenceStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if !self.failed_once.replace(true) {
                return Err(BlogError::Preferences("disk full".to_string()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_successful_toggle_clears_earlier_theme_error() {
        let store: Box<dyn PreferenceStore> = Box::new(FlakyStore::default());
        let mut c = SessionController::new(ThemePreference::load_with_system(store, false).unwrap());

        assert!(!c.toggle_theme());
        assert_eq!(c.error().unwrap().kind, ErrorKind::Preferences);

        assert!(c.toggle_theme());
        assert!(c.error().is_none());
    }

    #[test]
    fn test_successful_toggle_keeps_other_errors() {
        let mut c = controller();
        c.set_topic("  ");
        assert!(c.begin_generation().is_none());

        c.toggle_theme();
        assert_eq!(c.error().unwrap().kind, ErrorKind::Validation);
    }
}
