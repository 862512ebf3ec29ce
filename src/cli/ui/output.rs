use console::{StyledObject, style};

use crate::session::{ContentStats, UiError};

/// Themed terminal printer
pub struct Output {
    dark: bool,
}

impl Output {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// Brighter palette on dark backgrounds
    fn tint<D>(&self, styled: StyledObject<D>) -> StyledObject<D> {
        if self.dark { styled.bright() } else { styled }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", self.tint(style("✓").green()), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.tint(style("✗").red()), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", self.tint(style("⚠").yellow()), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", self.tint(style("ℹ").blue()), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", self.tint(style(message).bold().underlined()));
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", self.tint(style(message).bold()));
        println!("{}", "─".repeat(40));
    }

    /// Error slot, tagged with its kind
    pub fn ui_error(&self, error: &UiError) {
        eprintln!(
            "{} {} {}",
            self.tint(style("✗").red()),
            self.tint(style(format!("[{}]", error.kind)).dim()),
            error.message
        );
    }

    pub fn content(&self, content: &str) {
        self.section("Generated Content");
        println!("{}", content);
    }

    pub fn stats(&self, stats: &ContentStats) {
        if stats.is_empty() {
            return;
        }
        println!(
            "\n{} {}   {} {} min read",
            self.tint(style("Words:").cyan().bold()),
            stats.word_count,
            self.tint(style("Reading time:").magenta().bold()),
            stats.reading_time
        );
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
