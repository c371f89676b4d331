//! RSS feed fetching and decoding.
//!
//! The feed endpoint is `GET <base>/<username>/rss/list`. Both stages here
//! are fatal for the whole run: a transport or HTTP-status failure surfaces
//! as [`SyncError::Network`], and a document without the expected
//! channel/item structure surfaces as [`SyncError::Format`]. There is no
//! partial feed.
//!
//! Decoding uses a `quick_xml` pull reader. Item fields are accumulated per
//! `<item>`; `<description>` keeps its raw HTML (CDATA or entity-escaped)
//! because the normalizer later mines it for the excerpt and cover image.

use crate::error::SyncError;
use crate::models::FeedItem;
use chrono::DateTime;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Production feed host.
pub const CSDN_BASE_URL: &str = "https://blog.csdn.net";

/// Browser-like user agent; the feed endpoint rejects obvious bots.
pub const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Fetch the raw RSS document for `username`.
///
/// No explicit timeout here; the feed fetch relies on the transport default.
/// Article fetches carry their own bounded timeout.
#[instrument(level = "info", skip_all, fields(%username))]
pub async fn fetch_feed(base_url: &str, username: &str) -> Result<String, SyncError> {
    let feed_url = Url::parse(base_url)?.join(&format!("{username}/rss/list"))?;
    info!(url = %feed_url, "Fetching RSS feed");

    let response = reqwest::Client::new()
        .get(feed_url.clone())
        .header(USER_AGENT, BROWSER_UA)
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    info!(bytes = body.len(), "Fetched RSS feed");
    Ok(body)
}

#[derive(Default)]
struct ItemAccumulator {
    title: String,
    link: String,
    pub_date: String,
    description: String,
    category: String,
    categories: Vec<String>,
}

/// Decode an RSS document into ordered [`FeedItem`]s, truncated to `max_items`.
///
/// # Errors
///
/// [`SyncError::Format`] when the XML is malformed or the document has no
/// `<channel>` with at least one `<item>`.
#[instrument(level = "info", skip_all)]
pub fn parse_feed(xml: &str, max_items: usize) -> Result<Vec<FeedItem>, SyncError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items: Vec<FeedItem> = Vec::new();
    let mut saw_channel = false;
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut acc = ItemAccumulator::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match name.as_str() {
                    "channel" => saw_channel = true,
                    "item" => {
                        in_item = true;
                        in_description = false;
                        acc = ItemAccumulator::default();
                    }
                    "description" if in_item => in_description = true,
                    "category" if in_item => acc.category.clear(),
                    _ => {}
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = String::from_utf8_lossy(&name_buf);
                match name.as_ref() {
                    "description" => in_description = false,
                    "category" if in_item => {
                        let label = acc.category.trim().to_string();
                        if !label.is_empty() {
                            acc.categories.push(label);
                        }
                    }
                    "item" if in_item => {
                        in_item = false;
                        items.push(finish_item(std::mem::take(&mut acc)));
                    }
                    _ => {}
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) if in_item => {
                let text = e.unescape().unwrap_or_default().into_owned();
                accumulate(&mut acc, in_description, &current_tag, &text);
            }
            Ok(Event::CData(e)) if in_item => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                accumulate(&mut acc, in_description, &current_tag, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SyncError::Format(format!("XML parse error: {e}"))),
            _ => {}
        }
    }

    if !saw_channel || items.is_empty() {
        return Err(SyncError::Format(
            "feed has no channel/item structure".to_string(),
        ));
    }

    let total = items.len();
    items.truncate(max_items);
    info!(total, kept = items.len(), "Decoded feed items");
    Ok(items)
}

fn accumulate(acc: &mut ItemAccumulator, in_description: bool, current_tag: &str, text: &str) {
    if in_description {
        acc.description.push_str(text);
        return;
    }
    match current_tag {
        "title" => acc.title.push_str(text),
        "link" => acc.link.push_str(text),
        "pubDate" => acc.pub_date.push_str(text),
        "category" => acc.category.push_str(text),
        _ => {}
    }
}

fn finish_item(acc: ItemAccumulator) -> FeedItem {
    let pub_date = if acc.pub_date.is_empty() {
        None
    } else {
        match DateTime::parse_from_rfc2822(acc.pub_date.trim()) {
            Ok(dt) => Some(dt),
            Err(e) => {
                warn!(pub_date = %acc.pub_date, error = %e, "Unparsable pubDate; treating as absent");
                None
            }
        }
    };
    debug!(title = %acc.title, link = %acc.link, categories = acc.categories.len(), "Decoded feed item");
    FeedItem {
        title: acc.title,
        link: acc.link,
        pub_date,
        description: acc.description,
        categories: acc.categories,
    }
}
