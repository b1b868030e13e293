//! Gangan Online (ganganonline.com) chapter scraper.
//!
//! The site renders client-side, so the visible markup carries nothing
//! useful. The chapter data ships embedded in the `#__NEXT_DATA__` script
//! tag; extraction walks the fixed key path `props.pageProps.data.default`
//! and treats any missing key as a structure violation.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::dates;
use crate::error::{FeedError, Result};
use crate::feed::{FeedChannel, FeedEntry};
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider, page_title};
use crate::utils::{dig, encode, json_id};

#[derive(Debug)]
pub struct GanganOnline;

#[async_trait::async_trait]
impl Provider for GanganOnline {
    fn id(&self) -> &'static str {
        "ganganonline.com"
    }

    #[instrument(level = "info", skip(self, client))]
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let index_url = format!("https://www.ganganonline.com/title/{}", encode(work_id));
        let html = client.get_text(&index_url).await?;
        let channel = parse_index(&html, work_id, &index_url)?;
        info!(count = channel.entries.len(), "Extracted Gangan Online chapters");
        Ok(FeedOutcome::Feed(channel))
    }
}

fn parse_index(html: &str, work_id: &str, index_url: &str) -> Result<FeedChannel> {
    let document = Html::parse_document(html);

    let title = page_title(&document)
        .ok_or_else(|| FeedError::Parse("ganganonline: missing <title>".into()))?;

    let script_selector = Selector::parse("#__NEXT_DATA__").unwrap();
    let raw = document
        .select(&script_selector)
        .next()
        .ok_or_else(|| FeedError::Parse("ganganonline: no __NEXT_DATA__ script".into()))?
        .text()
        .collect::<String>();
    let data: Value = serde_json::from_str(&raw)
        .map_err(|e| FeedError::Parse(format!("ganganonline: __NEXT_DATA__ is not JSON: {e}")))?;

    let props = dig(&data, &["props", "pageProps", "data", "default"])?;
    let description = props
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let chapters = props
        .get("chapters")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Parse("ganganonline: chapters list missing".into()))?;

    let mut entries = Vec::new();
    for chapter in chapters {
        let Some(period) = chapter.get("publishingPeriod").and_then(Value::as_str) else {
            continue;
        };
        let Some(published) = dates::parse_dotted_date(period, dates::jst()) else {
            warn!(period, "Unparseable publishing period; skipping chapter");
            continue;
        };
        let Some(chapter_id) = chapter.get("id").and_then(json_id) else {
            continue;
        };

        let title = ["mainText", "subText"]
            .iter()
            .filter_map(|key| chapter.get(*key).and_then(Value::as_str))
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        entries.push(FeedEntry {
            title,
            link: format!(
                "https://www.ganganonline.com/title/{}/chapter/{}",
                encode(work_id),
                encode(&chapter_id)
            ),
            published,
        });
    }

    Ok(FeedChannel {
        title,
        link: index_url.to_string(),
        description,
        entries,
    })
}
