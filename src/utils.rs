//! Small helpers shared across the pipeline: HTML stripping, character-based
//! truncation, counter parsing, and output-directory validation.

use crate::error::SyncError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Remove HTML tags from a snippet, leaving the text content.
pub fn strip_html(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Truncate to `max` characters, appending `...` only when something was cut.
///
/// Counts `char`s, not bytes, so CJK text truncates at the expected point.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Pull the first integer out of a UI text node like `阅读 1234`.
pub fn extract_number(text: &str) -> Option<u64> {
    NUM_RE.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probes it with a throwaway file.
/// Run this before fetching anything so a bad output path fails fast.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), SyncError> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
