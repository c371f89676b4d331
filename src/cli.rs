//! Command-line interface definitions.

use clap::Parser;

/// Command-line arguments for the blog sync tool.
///
/// # Examples
///
/// ```sh
/// # Sync using ./config.json
/// blog_sync
///
/// # Explicit config path, override the account handle
/// blog_sync -c site/config.json --username someone_else
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Override the configured CSDN username
    #[arg(short, long, env = "BLOG_SYNC_USERNAME")]
    pub username: Option<String>,

    /// Override the configured maximum number of posts to sync
    #[arg(long)]
    pub max_posts: Option<usize>,
}
