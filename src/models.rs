//! Data models for feed items, scraped article details, and persisted posts.
//!
//! Three records move through the pipeline:
//! - [`FeedItem`]: one entry decoded from the RSS feed (ephemeral)
//! - [`ArticleDetail`]: the scraped and converted article body plus
//!   engagement counters (ephemeral)
//! - [`Post`]: the persistent record written to the JSON index, one per
//!   distinct `originalUrl`
//!
//! `Post` serializes with camelCase field names so the on-disk index keeps
//! the shape the site's front end already consumes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Fixed source tag stamped on every post produced by this tool.
pub const SOURCE_TAG: &str = "csdn";

/// One entry from the RSS feed, as decoded by the feed parser.
///
/// The `description` field keeps the raw HTML snippet from the feed: the
/// normalizer needs it both for the plain-text excerpt and for the
/// `<img src>` cover-image extraction.
#[derive(Debug, Clone)]
pub struct FeedItem {
    /// Article title.
    pub title: String,
    /// Canonical article URL. Unique per item; the dedup key downstream.
    pub link: String,
    /// Publication date, when the feed carried a parsable `pubDate`.
    pub pub_date: Option<DateTime<FixedOffset>>,
    /// Raw HTML snippet from the feed's `description` element.
    pub description: String,
    /// Ordered category labels, possibly empty.
    pub categories: Vec<String>,
}

/// The result of scraping one article page.
#[derive(Debug, Clone)]
pub struct ArticleDetail {
    /// Article body converted to Markdown.
    pub markdown_body: String,
    /// Estimated reading time in minutes, at 300 non-whitespace chars per
    /// minute, never below 1.
    pub read_minutes: u32,
    /// View counter from the page, 0 when missing or unparsable.
    pub views: u64,
    /// Like counter from the page, 0 when missing or unparsable.
    pub likes: u64,
    /// Comment counter from the page, 0 when missing or unparsable.
    pub comments: u64,
}

/// A persisted blog post, one per distinct source URL.
///
/// Invariants maintained by the merge store:
/// - `original_url` is unique across the persisted index
/// - the index is sorted by `date` descending after every sync
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Sequence-assigned id for this run (1-based feed order).
    pub id: u32,
    pub title: String,
    /// URL-safe identifier derived from the title, max 50 chars.
    pub slug: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// 1–5 tags; a single placeholder tag when the feed had none.
    pub tags: Vec<String>,
    /// One of the fixed category buckets, derived from title/tags.
    pub category: String,
    pub author: String,
    /// Plain-text description, truncated to 150 chars + ellipsis.
    pub excerpt: String,
    pub cover_image: String,
    /// Display string, e.g. `5分钟`.
    pub read_time: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// Truncated body preview stored inline in the index.
    pub content: String,
    /// Relative path to the full Markdown file.
    pub content_file: String,
    /// Origin tag, always [`SOURCE_TAG`] for posts produced here.
    pub source: String,
    /// Canonical source URL; the dedup key.
    pub original_url: String,
}
