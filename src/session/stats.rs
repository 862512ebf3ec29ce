//! Derived content statistics.

use serde::Serialize;

use crate::constants::content::WORDS_PER_MINUTE;

/// Word count and reading-time estimate for the current content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub word_count: usize,
    /// Minutes, rounded up; zero only when there are no words
    pub reading_time: usize,
}

impl ContentStats {
    pub fn from_content(content: Option<&str>) -> Self {
        let word_count = content.map_or(0, |text| text.split_whitespace().count());
        Self {
            word_count,
            reading_time: word_count.div_ceil(WORDS_PER_MINUTE),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_content_is_zero() {
        assert_eq!(ContentStats::from_content(None), ContentStats::default());
        assert!(ContentStats::from_content(Some("  \n\t ")).is_empty());
    }

    #[test]
    fn test_hello_world() {
        let stats = ContentStats::from_content(Some("Hello world"));
        assert_eq!(stats.word_count, 2);
        assert_eq!(stats.reading_time, 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let words = |n: usize| vec!["word"; n].join(" ");

        assert_eq!(ContentStats::from_content(Some(&words(200))).reading_time, 1);
        assert_eq!(ContentStats::from_content(Some(&words(201))).reading_time, 2);
        assert_eq!(ContentStats::from_content(Some(&words(400))).reading_time, 2);
    }

    #[test]
    fn test_whitespace_runs_count_once() {
        let stats = ContentStats::from_content(Some("  one\n\ntwo \t three  "));
        assert_eq!(stats.word_count, 3);
    }
}
