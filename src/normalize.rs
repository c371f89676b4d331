//! Post normalization: pure derivations from a feed item plus (optional)
//! scraped article detail into the persisted [`Post`] fields.
//!
//! Everything here is deterministic given its inputs, except the date
//! fallback for items without a `pubDate`, which uses the current date at
//! run time.

use crate::config::SyncConfig;
use crate::models::{ArticleDetail, FeedItem, Post, SOURCE_TAG};
use crate::utils::{strip_html, truncate_with_ellipsis};
use chrono::Utc;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder tag when the feed item carried no categories.
pub const DEFAULT_TAG: &str = "技术";

/// Read time reported for posts whose article scrape failed.
pub const FALLBACK_READ_TIME: &str = "5分钟";

/// Characters of plain text read per minute, for the read-time estimate.
const CHARS_PER_MINUTE: usize = 300;

static SLUG_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\u{4e00}-\u{9fa5}a-z0-9\s-]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"--+").unwrap());
static IMG_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)<img[^>]+src="([^">]+)""#).unwrap());

/// Derive a URL-safe slug from a title.
///
/// Lowercases, strips everything but CJK ideographs, ASCII letters, digits,
/// spaces and hyphens, collapses whitespace to single hyphens, collapses
/// hyphen runs, and caps the result at 50 characters. Idempotent aside from
/// the length cap.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.chars().take(50).collect()
}

/// `YYYY-MM-DD` for the item's publish date, or today when absent.
pub fn post_date(item: &FeedItem) -> String {
    match item.pub_date {
        Some(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        None => Utc::now().format("%Y-%m-%d").to_string(),
    }
}

/// First `<img src="...">` in the raw description, if any.
pub fn extract_cover_image(description: &str) -> Option<String> {
    IMG_SRC
        .captures(description)
        .map(|caps| caps[1].to_string())
}

/// Item categories deduplicated and capped at 5; a single placeholder tag
/// when the feed had none.
pub fn extract_tags(categories: &[String]) -> Vec<String> {
    let tags: Vec<String> = categories.iter().unique().take(5).cloned().collect();
    if tags.is_empty() {
        vec![DEFAULT_TAG.to_string()]
    } else {
        tags
    }
}

/// Classify a post into one of the fixed category buckets.
///
/// Buckets are checked in priority order (frontend, backend, algorithm,
/// essay, then the generic bucket); a title can match several keyword sets,
/// so the first hit wins. Title matching is case-insensitive; essay
/// keywords match on tags only.
pub fn classify(title: &str, tags: &[String]) -> String {
    let lower_title = title.to_lowercase();
    let has_tag = |k: &str| tags.iter().any(|t| t == k);

    if lower_title.contains("前端")
        || has_tag("前端")
        || has_tag("html")
        || has_tag("css")
        || has_tag("javascript")
    {
        "前端".to_string()
    } else if lower_title.contains("后端")
        || has_tag("后端")
        || has_tag("java")
        || has_tag("python")
        || has_tag("node")
    {
        "后端".to_string()
    } else if lower_title.contains("算法") || has_tag("算法") || has_tag("数据结构") {
        "算法".to_string()
    } else if has_tag("随笔") || has_tag("生活") || has_tag("思考") {
        "随笔".to_string()
    } else {
        "技术文章".to_string()
    }
}

/// Estimated reading minutes for a Markdown body: non-whitespace character
/// count at 300 chars/minute, rounded up, floor of 1.
pub fn read_minutes(markdown: &str) -> u32 {
    let chars = markdown.chars().filter(|c| !c.is_whitespace()).count();
    chars.div_ceil(CHARS_PER_MINUTE).max(1) as u32
}

/// Build the persisted post for one feed item.
///
/// `detail` is `None` when the article scrape failed; the post then falls
/// back to feed-description content, the fixed fallback read time, and zero
/// counters. Returns the post (with `content_file` left empty for the
/// Markdown writer to fill in) together with the full Markdown body to
/// write.
pub fn build_post(
    item: &FeedItem,
    detail: Option<&ArticleDetail>,
    id: u32,
    config: &SyncConfig,
) -> (Post, String) {
    let slug = slugify(&item.title);
    let date = post_date(item);
    let tags = extract_tags(&item.categories);
    let category = classify(&item.title, &tags);
    let cover_image = extract_cover_image(&item.description)
        .unwrap_or_else(|| config.default_cover_image.clone());
    let excerpt = truncate_with_ellipsis(&strip_html(&item.description), 150);

    let (body, read_time, views, likes, comments) = match detail {
        Some(d) => (
            d.markdown_body.clone(),
            format!("{}分钟", d.read_minutes),
            d.views,
            d.likes,
            d.comments,
        ),
        None => (
            truncate_with_ellipsis(&strip_html(&item.description), 200),
            FALLBACK_READ_TIME.to_string(),
            0,
            0,
            0,
        ),
    };

    // The index stores a bounded preview; the full body goes to the
    // Markdown file.
    let mut content: String = body.chars().take(500).collect();
    content.push_str("...");

    let post = Post {
        id,
        title: item.title.clone(),
        slug,
        date,
        tags,
        category,
        author: config.author.clone(),
        excerpt,
        cover_image,
        read_time,
        views,
        likes,
        comments,
        content,
        content_file: String::new(),
        source: SOURCE_TAG.to_string(),
        original_url: item.link.clone(),
    };
    (post, body)
}
