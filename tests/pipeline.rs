//! End-to-end pipeline tests.
//!
//! Each test stands up a local `wiremock` server playing both the feed
//! endpoint and the article pages, so no real network traffic is made.
//! Output goes to per-test directories under the system temp dir.

use std::collections::HashSet;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blog_sync::config::SyncConfig;
use blog_sync::error::SyncError;
use blog_sync::models::Post;
use blog_sync::pipeline;

/// Per-test output tree under the system temp dir.
fn test_config(tag: &str) -> SyncConfig {
    let root = std::env::temp_dir().join(format!("blog_sync_e2e_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&root).unwrap();
    // A stale index from an earlier invocation would skew merge counts.
    let _ = std::fs::remove_file(root.join("blog.json"));
    SyncConfig {
        username: "testuser".to_string(),
        max_posts: 10,
        output_json_path: root.join("blog.json").to_string_lossy().into_owned(),
        markdown_dir: root.join("md").to_string_lossy().into_owned(),
        image_dir: root.join("img").to_string_lossy().into_owned(),
        author: "Tester".to_string(),
        default_cover_image: "/img/default.png".to_string(),
    }
}

/// Two-item feed whose article links point back at the mock server.
fn feed_xml(base: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>testuser's blog</title>
    <item>
      <title>前端开发技巧</title>
      <link>{base}/article/1</link>
      <pubDate>Wed, 10 Apr 2024 08:00:00 GMT</pubDate>
      <description><![CDATA[<p>前端技巧简介</p><img src="https://img.example.com/cover1.png">]]></description>
      <category>前端</category>
      <category>javascript</category>
    </item>
    <item>
      <title>第二篇文章</title>
      <link>{base}/article/2</link>
      <pubDate>Tue, 09 Apr 2024 08:00:00 GMT</pubDate>
      <description>这是第二篇文章的摘要，没有图片。</description>
    </item>
  </channel>
</rss>"#
    )
}

const GOOD_ARTICLE: &str = r#"<html><body>
  <span class="read-count">阅读 1234</span>
  <span class="likenum">56</span>
  <span class="comment-count">7</span>
  <div id="article_content">
    <h2>背景</h2>
    <p>正文第一段。</p>
    <pre><code class="language-js">console.log(1)</code></pre>
    <div class="recommend-box"><p>推荐阅读</p></div>
  </div>
</body></html>"#;

const EMPTY_ARTICLE: &str =
    r#"<html><body><div class="main">页面没有文章容器</div></body></html>"#;

async fn mount_feed(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/testuser/rss/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn read_index(config: &SyncConfig) -> Vec<Post> {
    let raw = std::fs::read_to_string(&config.output_json_path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn sync_run_with_one_failing_article_degrades_only_that_item() {
    let server = MockServer::start().await;
    mount_feed(&server, feed_xml(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/article/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOD_ARTICLE))
        .mount(&server)
        .await;
    // Article 2 serves a page with no matching content container.
    Mock::given(method("GET"))
        .and(path("/article/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_ARTICLE))
        .mount(&server)
        .await;

    let config = test_config("degrade");
    let summary = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.degraded, 1);
    assert_eq!(summary.total_indexed, 2);

    let index = read_index(&config);
    assert_eq!(index.len(), 2);

    // Sorted date-descending: the scraped article is newer.
    assert_eq!(index[0].title, "前端开发技巧");
    assert_eq!(index[0].date, "2024-04-10");
    assert_eq!(
        (index[0].views, index[0].likes, index[0].comments),
        (1234, 56, 7)
    );
    assert!(index[0].content.contains("## 背景"));
    assert!(index[0].content.contains("```js"));
    assert!(!index[0].content.contains("推荐阅读"));
    assert_eq!(index[0].category, "前端");
    assert_eq!(index[0].cover_image, "https://img.example.com/cover1.png");

    // The failing item fell back to feed-description data.
    assert_eq!(index[1].title, "第二篇文章");
    assert_eq!((index[1].views, index[1].likes, index[1].comments), (0, 0, 0));
    assert_eq!(index[1].read_time, "5分钟");
    assert!(index[1].content.starts_with("这是第二篇文章的摘要"));
    assert_eq!(index[1].cover_image, config.default_cover_image);

    // Distinct slugs and a written Markdown file for both.
    assert_ne!(index[0].slug, index[1].slug);
    for post in &index {
        assert!(
            std::path::Path::new(&post.content_file).exists(),
            "missing Markdown file {}",
            post.content_file
        );
        let md = std::fs::read_to_string(&post.content_file).unwrap();
        assert!(md.starts_with("---\n"));
        assert!(md.contains(&format!("originalUrl: \"{}\"", post.original_url)));
    }
}

#[tokio::test]
async fn rerunning_an_unchanged_feed_updates_in_place() {
    let server = MockServer::start().await;
    mount_feed(&server, feed_xml(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/article/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOD_ARTICLE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/article/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_ARTICLE))
        .mount(&server)
        .await;

    let config = test_config("rerun");
    pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap();
    let first: HashSet<String> = read_index(&config)
        .into_iter()
        .map(|p| p.original_url)
        .collect();

    let summary = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(summary.total_indexed, first.len());

    let second: HashSet<String> = read_index(&config)
        .into_iter()
        .map(|p| p.original_url)
        .collect();
    assert_eq!(first, second);
}

#[tokio::test]
async fn max_posts_truncates_the_feed() {
    let server = MockServer::start().await;
    mount_feed(&server, feed_xml(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/article/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOD_ARTICLE))
        .mount(&server)
        .await;

    let mut config = test_config("maxposts");
    config.max_posts = 1;
    let summary = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(read_index(&config).len(), 1);
}

#[tokio::test]
async fn feed_http_failure_is_fatal_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/testuser/rss/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config("feedfail");
    let err = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Network(_)));
    assert!(!std::path::Path::new(&config.output_json_path).exists());
}

#[tokio::test]
async fn malformed_feed_is_fatal_and_writes_nothing() {
    let server = MockServer::start().await;
    mount_feed(&server, "<html>not a feed</html>".to_string()).await;

    let config = test_config("badfeed");
    let err = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Format(_)));
    assert!(!std::path::Path::new(&config.output_json_path).exists());
}

#[tokio::test]
async fn article_http_error_also_falls_back() {
    let server = MockServer::start().await;
    mount_feed(&server, feed_xml(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/article/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOD_ARTICLE))
        .mount(&server)
        .await;
    // Article 2 404s; a network failure at the article stage is recoverable.
    Mock::given(method("GET"))
        .and(path("/article/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = test_config("artfail");
    let summary = pipeline::run(&config, &server.uri(), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.degraded, 1);
}
