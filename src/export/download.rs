//! Plain-text download.

use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::types::{BlogError, Result};

/// File name for a topic: `blog-<topic>.txt`.
///
/// Whitespace runs become a single hyphen and the result is lowercased.
/// Path separators also become hyphens so the file stays inside the target
/// directory; all other punctuation is kept as typed.
pub fn download_filename(topic: &str) -> String {
    let slug = topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .replace(['/', '\\'], "-");
    format!("blog-{}.txt", slug)
}

/// Destination for downloaded content
pub trait Downloader {
    /// Write `content` verbatim under `filename`, returning where it landed
    fn save(&self, filename: &str, content: &str) -> Result<PathBuf>;
}

/// Writes downloads into a directory on disk
#[derive(Debug, Clone)]
pub struct FileDownloader {
    dir: PathBuf,
}

impl FileDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Downloader for FileDownloader {
    fn save(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        debug!("Writing {} bytes to {}", content.len(), path.display());

        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, content))
            .map_err(|e| {
                BlogError::Download(format!("Failed to save {}: {}", path.display(), e))
            })?;

        info!("Downloaded content to {}", path.display());
        Ok(path)
    }
}
