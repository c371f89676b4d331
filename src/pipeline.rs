//! Pipeline orchestrator.
//!
//! One sync run, strictly sequential:
//!
//! 1. fetch the RSS feed (fatal on failure)
//! 2. decode it into at most `maxPosts` items (fatal on failure)
//! 3. per item, in feed order: scrape the article (a failure here is caught,
//!    logged, and degrades just that item), normalize, write the Markdown
//!    file, accumulate the post — with a fixed delay between items so the
//!    source is never asked for two pages back to back
//! 4. merge the accumulated posts into the persisted index and rewrite it
//!
//! The index is read and written only in step 4, so a feed-stage failure
//! leaves it untouched.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::feed;
use crate::normalize;
use crate::outputs;
use crate::scrapers::csdn::ArticleScraper;
use crate::utils::ensure_writable_dir;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Fixed pause between successive per-item article fetches.
pub const REQUEST_DELAY: Duration = Duration::from_millis(1000);

/// Counts reported by a completed run.
#[derive(Debug)]
pub struct SyncSummary {
    /// Feed items processed this run.
    pub processed: usize,
    /// Items whose article scrape failed and fell back to feed data.
    pub degraded: usize,
    /// Posts in the persisted index after the merge.
    pub total_indexed: usize,
}

/// Run one sync against `feed_base_url` with the given inter-item delay.
///
/// The production entry point passes [`feed::CSDN_BASE_URL`] and
/// [`REQUEST_DELAY`]; tests substitute a local server and a zero delay.
#[instrument(level = "info", skip_all, fields(username = %config.username))]
pub async fn run(
    config: &SyncConfig,
    feed_base_url: &str,
    delay: Duration,
) -> Result<SyncSummary, SyncError> {
    info!(username = %config.username, "Starting blog sync");

    // Fail fast on unusable output paths, before any network traffic.
    if let Some(parent) = Path::new(&config.output_json_path).parent() {
        let parent = parent.to_string_lossy();
        if !parent.is_empty() {
            ensure_writable_dir(&parent).await?;
        }
    }
    ensure_writable_dir(&config.markdown_dir).await?;
    ensure_writable_dir(&config.image_dir).await?;

    let xml = feed::fetch_feed(feed_base_url, &config.username).await?;
    let items = feed::parse_feed(&xml, config.max_posts)?;
    info!(count = items.len(), "Feed items to process");

    let scraper = ArticleScraper::new()?;
    let mut new_posts = Vec::with_capacity(items.len());
    let mut degraded = 0usize;

    for (i, item) in items.iter().enumerate() {
        info!(
            index = i + 1,
            total = items.len(),
            title = %item.title,
            "Processing article"
        );

        let detail = match scraper.scrape(&item.link).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(url = %item.link, error = %e, "Article scrape failed; falling back to feed description");
                degraded += 1;
                None
            }
        };

        let (mut post, body) =
            normalize::build_post(item, detail.as_ref(), (i + 1) as u32, config);
        post.content_file =
            outputs::markdown::write_post(&config.markdown_dir, &post, &body).await?;
        new_posts.push(post);

        sleep(delay).await;
    }

    let processed = new_posts.len();
    let existing = outputs::json::load_index(&config.output_json_path).await?;
    let merged = outputs::json::merge_posts(existing, new_posts);
    outputs::json::write_index(&config.output_json_path, &merged).await?;

    info!(
        processed,
        degraded,
        total = merged.len(),
        "Sync complete"
    );
    Ok(SyncSummary {
        processed,
        degraded,
        total_indexed: merged.len(),
    })
}
