//! Urasunday (urasunday.com) chapter scraper.
//!
//! Chapter rows live under `.chapter`; rows carrying the `charge` class are
//! paid chapters and are never candidates. Each remaining row must hold an
//! anchor with exactly three text cells (title, subtitle, date). This
//! provider validates that shape strictly: a single malformed row fails the
//! whole fetch instead of being skipped.

use scraper::{Html, Selector};
use tracing::{info, instrument};
use url::Url;

use crate::dates;
use crate::error::{FeedError, Result};
use crate::feed::{FeedChannel, FeedEntry};
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider, page_title};
use crate::utils::encode;

#[derive(Debug)]
pub struct UraSunday;

#[async_trait::async_trait]
impl Provider for UraSunday {
    fn id(&self) -> &'static str {
        "urasunday.com"
    }

    #[instrument(level = "info", skip(self, client))]
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let index_url = Url::parse(&format!("https://urasunday.com/title/{}", encode(work_id)))
            .map_err(|e| FeedError::Parse(format!("urasunday: bad index url: {e}")))?;

        let html = client.get_text(index_url.as_str()).await?;
        let channel = parse_index(&html, &index_url)?;
        info!(count = channel.entries.len(), "Extracted Urasunday chapters");
        Ok(FeedOutcome::Feed(channel))
    }
}

fn parse_index(html: &str, index_url: &Url) -> Result<FeedChannel> {
    let document = Html::parse_document(html);

    let title = page_title(&document)
        .ok_or_else(|| FeedError::Parse("urasunday: missing <title>".into()))?;
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let description = document
        .select(&meta_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or_else(|| FeedError::Parse("urasunday: missing meta description".into()))?
        .to_string();

    let row_selector = Selector::parse(".chapter li:not(.charge)").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();
    let cell_selector = Selector::parse("div > div:not(.new)").unwrap();

    let mut entries = Vec::new();
    for row in document.select(&row_selector) {
        let anchor = row
            .select(&anchor_selector)
            .next()
            .ok_or_else(|| FeedError::Parse("urasunday: chapter row without a link".into()))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| FeedError::Parse("urasunday: chapter link without href".into()))?;

        let cells: Vec<_> = anchor.select(&cell_selector).collect();
        if cells.len() != 3 {
            return Err(FeedError::Parse(format!(
                "urasunday: expected 3 chapter cells, found {}",
                cells.len()
            )));
        }

        let date_text = cells[2].text().collect::<String>();
        let published = dates::parse_slashed_date(&date_text, dates::jst()).ok_or_else(|| {
            FeedError::Parse(format!(
                "urasunday: unparseable chapter date `{}`",
                date_text.trim()
            ))
        })?;

        let title = cells[..2]
            .iter()
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let link = index_url
            .join(href)
            .map_err(|e| FeedError::Parse(format!("urasunday: unresolvable href `{href}`: {e}")))?;

        entries.push(FeedEntry {
            title,
            link: link.to_string(),
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
