//! Utility functions shared by the corpus loader and the index codec.
//!
//! ## Modules
//!
//! - [`encoding`] - Variable-length integer encoding (varint) and LE helpers
//! - [`progress`] - Progress bars that compile away without the `progress` feature

pub mod encoding;
pub mod progress;

pub use encoding::*;

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
