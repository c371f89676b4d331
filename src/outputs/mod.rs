//! Output writers: per-post Markdown files and the merged JSON index.
//!
//! - [`markdown`]: writes one `<date>-<slug>.md` file per post with a
//!   front-matter header
//! - [`json`]: reconciles the run's posts with the previously persisted
//!   index (deduplicated by `originalUrl`) and rewrites it wholesale

pub mod json;
pub mod markdown;
