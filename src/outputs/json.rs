//! Merge/dedup store for the persisted JSON index.
//!
//! The index is a pretty-printed JSON array of posts, one per distinct
//! `originalUrl`. Each sync run reads it once, merges the run's posts on
//! top (a post whose `originalUrl` is already known overwrites that entry
//! in place; a new URL is appended), sorts by `date` descending, and
//! rewrites the file wholesale. Lexicographic comparison of `YYYY-MM-DD`
//! strings is date-correct.

use crate::error::SyncError;
use crate::models::Post;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Load the previously persisted index; an absent file is an empty index.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn load_index(path: &str) -> Result<Vec<Post>, SyncError> {
    if !Path::new(path).exists() {
        info!("No existing index; starting empty");
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).await?;
    let posts: Vec<Post> = serde_json::from_str(&raw)?;
    info!(count = posts.len(), "Loaded existing index");
    Ok(posts)
}

/// Merge this run's posts into the existing index, keyed by `originalUrl`.
///
/// Existing entries seed the map; each new post either inserts (unseen URL)
/// or replaces the previous entry wholesale. The result is sorted by `date`
/// descending; the sort is stable, so same-day posts keep insertion order
/// (existing before new).
pub fn merge_posts(existing: Vec<Post>, new_posts: Vec<Post>) -> Vec<Post> {
    let mut order: Vec<String> = Vec::new();
    let mut by_url: HashMap<String, Post> = HashMap::new();

    for post in existing.into_iter().chain(new_posts) {
        if !by_url.contains_key(&post.original_url) {
            order.push(post.original_url.clone());
        }
        by_url.insert(post.original_url.clone(), post);
    }

    let mut merged: Vec<Post> = order
        .into_iter()
        .filter_map(|url| by_url.remove(&url))
        .collect();
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

/// Persist the index, replacing the previous file wholesale.
#[instrument(level = "info", skip_all, fields(%path, count = posts.len()))]
pub async fn write_index(path: &str, posts: &[Post]) -> Result<(), SyncError> {
    let json = serde_json::to_string_pretty(posts)?;
    fs::write(path, json).await?;
    info!("Wrote index");
    Ok(())
}
