//! Article-page scrapers.
//!
//! One scraper per blog platform. A scraper owns its HTTP client (bounded
//! timeout, descriptive headers) and turns an article permalink into an
//! [`crate::models::ArticleDetail`]: the content region located by an
//! ordered list of candidate selectors, converted to Markdown, plus the
//! page's engagement counters.
//!
//! Scrape failures are per-item: the orchestrator catches them and degrades
//! that one post instead of aborting the run.

pub mod csdn;
