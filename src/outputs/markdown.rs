//! Per-post Markdown file writer.
//!
//! Each post becomes `<markdownDir>/<date>-<slug>.md`: a front-matter block
//! (title, date, slug, id, originalUrl), a blank line, then the full
//! Markdown body. An existing file at that path is overwritten
//! unconditionally — re-syncing refreshes content in place.

use crate::error::SyncError;
use crate::models::Post;
use std::fmt::Write as _;
use tokio::fs;
use tracing::{info, instrument};

/// Write the full Markdown file for a post.
///
/// Returns the file's path relative to the content root (the path recorded
/// in the post's `contentFile` field).
#[instrument(level = "info", skip_all, fields(slug = %post.slug, date = %post.date))]
pub async fn write_post(markdown_dir: &str, post: &Post, body: &str) -> Result<String, SyncError> {
    let file_name = format!("{}-{}.md", post.date, post.slug);
    let relative_path = format!("{}/{}", markdown_dir.trim_end_matches('/'), file_name);

    let mut contents = String::new();
    writeln!(contents, "---").unwrap();
    writeln!(contents, "title: \"{}\"", post.title).unwrap();
    writeln!(contents, "date: \"{}\"", post.date).unwrap();
    writeln!(contents, "slug: \"{}\"", post.slug).unwrap();
    writeln!(contents, "id: {}", post.id).unwrap();
    writeln!(contents, "originalUrl: \"{}\"", post.original_url).unwrap();
    writeln!(contents, "---").unwrap();
    writeln!(contents).unwrap();
    contents.push_str(body);

    fs::write(&relative_path, &contents).await?;
    info!(path = %relative_path, bytes = contents.len(), "Wrote Markdown file");
    Ok(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SOURCE_TAG;

    fn post() -> Post {
        Post {
            id: 7,
            title: "测试 标题".to_string(),
            slug: "测试-标题".to_string(),
            date: "2026-08-30".to_string(),
            tags: vec!["技术".to_string()],
            category: "技术文章".to_string(),
            author: "tester".to_string(),
            excerpt: String::new(),
            cover_image: String::new(),
            read_time: "1分钟".to_string(),
            views: 0,
            likes: 0,
            comments: 0,
            content: String::new(),
            content_file: String::new(),
            source: SOURCE_TAG.to_string(),
            original_url: "https://blog.csdn.net/u/article/details/7".to_string(),
        }
    }

    fn temp_dir(tag: &str) -> String {
        let dir = std::env::temp_dir().join(format!("blog_sync_md_{}_{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_write_post_front_matter_and_body() {
        let dir = temp_dir("fm");
        let path = write_post(&dir, &post(), "# 正文\n\n内容").await.unwrap();
        assert!(path.ends_with("2026-08-30-测试-标题.md"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("---\n"));
        assert!(written.contains("title: \"测试 标题\"\n"));
        assert!(written.contains("date: \"2026-08-30\"\n"));
        assert!(written.contains("slug: \"测试-标题\"\n"));
        assert!(written.contains("id: 7\n"));
        assert!(written
            .contains("originalUrl: \"https://blog.csdn.net/u/article/details/7\"\n"));
        assert!(written.contains("---\n\n# 正文"));
    }

    #[tokio::test]
    async fn test_write_post_overwrites_existing_file() {
        let dir = temp_dir("ow");
        let p = post();
        write_post(&dir, &p, "old body").await.unwrap();
        let path = write_post(&dir, &p, "new body").await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("new body"));
        assert!(!written.contains("old body"));
    }
}
