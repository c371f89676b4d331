//! # blog_sync
//!
//! Syncs a CSDN blog into a static site's content tree. One run fetches the
//! account's RSS feed, scrapes each article page, converts the article HTML
//! to Markdown, writes one Markdown file per post (front-matter + body),
//! and merges the run's posts into a persistent JSON index deduplicated by
//! canonical source URL.
//!
//! ## Architecture
//!
//! A strictly sequential pipeline, one article in flight at a time with a
//! fixed delay between fetches:
//!
//! 1. **Feed**: fetch and decode the RSS document ([`feed`])
//! 2. **Scrape**: locate and extract each article's content region
//!    ([`scrapers::csdn`]), convert it to Markdown ([`markdown`])
//! 3. **Normalize**: derive slug, category, excerpt, read time, cover image
//!    ([`normalize`])
//! 4. **Persist**: write Markdown files and the merged JSON index
//!    ([`outputs`])
//!
//! Feed-stage failures are fatal for the run; a single article's scrape
//! failure only degrades that post to feed-description data.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod markdown;
pub mod models;
pub mod normalize;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;
