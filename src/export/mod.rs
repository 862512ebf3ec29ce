//! Export Primitives
//!
//! Clipboard and file-download helpers operating on the current content.
//! Each fails independently with its own error kind.

mod clipboard;
mod download;

pub use clipboard::{Clipboard, Osc52Clipboard};
pub use download::{Downloader, FileDownloader, download_filename};
