//! Sync configuration.
//!
//! Loaded once at startup from a JSON file and threaded by reference into
//! every component that needs it. There is no process-wide configuration
//! state.

use crate::error::SyncError;
use serde::Deserialize;
use tracing::info;

/// Configuration for one sync run.
///
/// Field names in the file are camelCase, e.g.:
///
/// ```json
/// {
///   "username": "myhandle",
///   "maxPosts": 10,
///   "outputJsonPath": "data/blog.json",
///   "markdownDir": "content/blog",
///   "imageDir": "assets/images",
///   "author": "Me",
///   "defaultCoverImage": "/assets/images/default-cover.png"
/// }
/// ```
///
/// Every field has a default, so a partial (or empty) config file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncConfig {
    /// CSDN account handle whose feed is synced.
    pub username: String,
    /// Maximum number of feed items to process per run.
    pub max_posts: usize,
    /// Path of the persisted JSON index.
    pub output_json_path: String,
    /// Directory receiving one Markdown file per post.
    pub markdown_dir: String,
    /// Directory for downloaded images (created up front, reserved for use
    /// by the site build).
    pub image_dir: String,
    /// Author name stamped on every post.
    pub author: String,
    /// Cover image used when the feed description has no `<img>`.
    pub default_cover_image: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            max_posts: 10,
            output_json_path: "data/blog.json".to_string(),
            markdown_dir: "content/blog".to_string(),
            image_dir: "assets/images".to_string(),
            author: "admin".to_string(),
            default_cover_image: "/assets/images/default-cover.png".to_string(),
        }
    }
}

/// Load a [`SyncConfig`] from a JSON file.
pub fn load_config(path: &str) -> Result<SyncConfig, SyncError> {
    let raw = std::fs::read_to_string(path)?;
    let config: SyncConfig = serde_json::from_str(&raw)?;
    info!(path, username = %config.username, max_posts = config.max_posts, "Loaded configuration");
    Ok(config)
}
