//! Binary entry point: parse the CLI, load configuration, run one sync.
//!
//! A fatal error at the feed stage (or any unrecoverable I/O failure) is
//! logged and the process exits non-zero with the index left untouched.

use blog_sync::cli::Cli;
use blog_sync::config;
use blog_sync::feed::CSDN_BASE_URL;
use blog_sync::pipeline::{self, REQUEST_DELAY};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();

    let mut config = match config::load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config, error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    if let Some(username) = args.username {
        config.username = username;
    }
    if let Some(max_posts) = args.max_posts {
        config.max_posts = max_posts;
    }

    match pipeline::run(&config, CSDN_BASE_URL, REQUEST_DELAY).await {
        Ok(summary) => {
            let elapsed = start_time.elapsed();
            info!(
                processed = summary.processed,
                degraded = summary.degraded,
                total = summary.total_indexed,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Execution complete"
            );
        }
        Err(e) => {
            error!(error = %e, "Sync failed");
            std::process::exit(1);
        }
    }
}
