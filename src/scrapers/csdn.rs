//! CSDN article scraper.
//!
//! Given an article permalink, fetches the page with a bounded timeout and
//! browser-like headers, locates the content region by trying candidate
//! selectors in order, sheds known boilerplate, converts the
//! fragment to Markdown, and reads the engagement counters.
//!
//! Counter extraction never fails the scrape: each of views/likes/comments
//! independently falls back to 0 when its UI node is missing or has no
//! digits in it.

use crate::error::SyncError;
use crate::feed::BROWSER_UA;
use crate::markdown::MarkdownConverter;
use crate::models::ArticleDetail;
use crate::normalize::read_minutes;
use crate::utils::extract_number;
use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Candidate content containers, tried in order; the first match wins.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article-content",
    "#article_content",
    ".blog-content-box",
];

/// Boilerplate dropped from the content region before conversion.
const BOILERPLATE_SELECTORS: &[&str] = &[
    ".hide-article-box",
    ".article-bar-bottom",
    ".recommend-box",
    ".template-box",
];

const ARTICLE_TIMEOUT: Duration = Duration::from_secs(10);

static CONTENT: Lazy<Vec<Selector>> = Lazy::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});
static READ_COUNT: Lazy<Selector> = Lazy::new(|| Selector::parse(".read-count").unwrap());
static LIKE_COUNT: Lazy<Selector> = Lazy::new(|| Selector::parse(".likenum").unwrap());
static COMMENT_COUNT: Lazy<Selector> = Lazy::new(|| Selector::parse(".comment-count").unwrap());

/// Scraper for CSDN article pages.
#[derive(Debug)]
pub struct ArticleScraper {
    client: Client,
    converter: MarkdownConverter,
}

impl ArticleScraper {
    pub fn new() -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));

        let client = Client::builder()
            .timeout(ARTICLE_TIMEOUT)
            .default_headers(headers)
            .build()?;
        let converter = MarkdownConverter::new(BOILERPLATE_SELECTORS.iter().copied());
        Ok(Self { client, converter })
    }

    /// Fetch and extract one article.
    ///
    /// # Errors
    ///
    /// [`SyncError::Network`] on transport or HTTP-status failure,
    /// [`SyncError::ContentNotFound`] when no candidate selector matches.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn scrape(&self, url: &str) -> Result<ArticleDetail, SyncError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.extract(url, &body)
    }

    fn extract(&self, url: &str, html: &str) -> Result<ArticleDetail, SyncError> {
        let document = Html::parse_document(html);

        let container = CONTENT
            .iter()
            .find_map(|sel| document.select(sel).next())
            .ok_or_else(|| SyncError::ContentNotFound(url.to_string()))?;

        let markdown_body = self.converter.convert_element(container);
        let minutes = read_minutes(&markdown_body);

        let views = counter(&document, &READ_COUNT);
        let likes = counter(&document, &LIKE_COUNT);
        let comments = counter(&document, &COMMENT_COUNT);
        debug!(views, likes, comments, "Extracted engagement counters");

        info!(bytes = markdown_body.len(), minutes, "Extracted article content");
        Ok(ArticleDetail {
            markdown_body,
            read_minutes: minutes,
            views,
            likes,
            comments,
        })
    }
}

/// Read one counter from the page, defaulting to 0 when the node is absent
/// or carries no digits.
fn counter(document: &Html, selector: &Selector) -> u64 {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| extract_number(&text))
        .unwrap_or(0)
}
