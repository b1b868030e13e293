//! Storia Dash (storia.takeshobo.co.jp) chapter scraper.
//!
//! Each work lives under `https://storia.takeshobo.co.jp/manga/<id>/` with a
//! visible episode list. An episode node sits inside its own anchor, and the
//! publish date is the first list item following a literal `公開日` label in
//! the same row. The synopsis is the paragraph text following the `ストーリー`
//! heading.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::dates;
use crate::error::{FeedError, Result};
use crate::feed::{FeedChannel, FeedEntry};
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider, page_title};
use crate::utils::encode;

#[derive(Debug)]
pub struct Storia;

#[async_trait::async_trait]
impl Provider for Storia {
    fn id(&self) -> &'static str {
        "storia.takeshobo.co.jp"
    }

    #[instrument(level = "info", skip(self, client))]
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let index_url = Url::parse(&format!(
            "https://storia.takeshobo.co.jp/manga/{}/",
            encode(work_id)
        ))
        .map_err(|e| FeedError::Parse(format!("storia: bad index url: {e}")))?;

        let html = client.get_text(index_url.as_str()).await?;
        let channel = parse_index(&html, &index_url)?;
        info!(count = channel.entries.len(), "Extracted Storia episodes");
        Ok(FeedOutcome::Feed(channel))
    }
}

/// Reduce the index page to a channel. Pure so fixtures can exercise it.
fn parse_index(html: &str, index_url: &Url) -> Result<FeedChannel> {
    let document = Html::parse_document(html);

    let title =
        page_title(&document).ok_or_else(|| FeedError::Parse("storia: missing <title>".into()))?;
    let description = synopsis(&document);

    let episode_selector = Selector::parse(".episode").unwrap();
    let mut entries = Vec::new();

    for episode in document.select(&episode_selector) {
        let Some(anchor) = containing_anchor(&episode) else {
            debug!("episode without a containing link; skipping");
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            debug!("episode link without href; skipping");
            continue;
        };
        let Some(date_text) = date_after_label(&episode) else {
            debug!("episode without a 公開日 label; skipping");
            continue;
        };
        let Some(published) = dates::parse_kanji_date(&date_text, dates::jst()) else {
            warn!(date = %date_text.trim(), "Unparseable episode date; skipping");
            continue;
        };
        let Ok(link) = index_url.join(href) else {
            warn!(href, "Unresolvable episode href; skipping");
            continue;
        };

        entries.push(FeedEntry {
            title: episode.text().collect::<String>().trim().to_string(),
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

/// Text of the `<p>` siblings following the `ストーリー` heading, if present.
fn synopsis(document: &Html) -> String {
    let heading_selector = Selector::parse("h2").unwrap();
    for heading in document.select(&heading_selector) {
        if heading.text().collect::<String>().trim() != "ストーリー" {
            continue;
        }
        return heading
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "p")
            .flat_map(|el| el.text())
            .collect::<String>()
            .trim()
            .to_string();
    }
    String::new()
}

fn containing_anchor<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}

/// The text of the first `<li>` after the `公開日` label that follows the
/// episode node.
fn date_after_label(episode: &ElementRef<'_>) -> Option<String> {
    let mut siblings = episode.next_siblings().filter_map(ElementRef::wrap);
    while let Some(el) = siblings.next() {
        if el.value().name() == "li" && el.text().collect::<String>().trim() == "公開日" {
            return siblings
                .find(|el| el.value().name() == "li")
                .map(|el| el.text().collect::<String>());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<!DOCTYPE html>
<html><head><title>夜桜さんち | ストーリアダッシュ</title></head><body>
<h2>ストーリー</h2>
<p>あらすじ第一段落。</p>
<section>
  <ul>
    <li><a href="/manga/yozakura/01/"><ul>
      <li class="episode">第1話</li><li>公開日</li><li>2021年1月5日</li>
    </ul></a></li>
    <li><a href="/manga/yozakura/02/"><ul>
      <li class="episode">第2話</li><li>公開日</li><li>2021年2月9日</li>
    </ul></a></li>
    <li><a href="/manga/yozakura/03/"><ul>
      <li class="episode">第3話</li><li>公開日</li><li>近日公開</li>
    </ul></a></li>
    <li><a href="/manga/yozakura/04/"><ul>
      <li class="episode">第4話</li><li>おまけ</li>
    </ul></a></li>
    <li><ul>
      <li class="episode">番外編</li><li>公開日</li><li>2021年3月1日</li>
    </ul></li>
  </ul>
</section>
</body></html>"#;

    fn index_url() -> Url {
        Url::parse("https://storia.takeshobo.co.jp/manga/yozakura/").unwrap()
    }

    #[test]
    fn extracts_only_dated_linked_episodes() {
        let channel = parse_index(INDEX, &index_url()).unwrap();

        // ep3 has no parseable date, ep4 no 公開日 label, 番外編 no anchor
        assert_eq!(channel.entries.len(), 2);
        assert_eq!(channel.entries[0].title, "第1話");
        assert_eq!(
            channel.entries[0].link,
            "https://storia.takeshobo.co.jp/manga/yozakura/01/"
        );
        assert_eq!(
            channel.entries[0].published.to_rfc3339(),
            "2021-01-05T00:00:00+09:00"
        );
        assert_eq!(channel.entries[1].title, "第2話");
    }

    #[test]
    fn channel_metadata_comes_from_fixed_locations() {
        let channel = parse_index(INDEX, &index_url()).unwrap();
        assert_eq!(channel.title, "夜桜さんち | ストーリアダッシュ");
        assert_eq!(channel.link, "https://storia.takeshobo.co.jp/manga/yozakura/");
        assert_eq!(channel.description, "あらすじ第一段落。");
    }

    #[test]
    fn missing_title_is_a_parse_error() {
        let err = parse_index("<html><body></body></html>", &index_url()).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn page_without_episodes_yields_empty_feed() {
        let html = "<html><head><title>t</title></head><body></body></html>";
        let channel = parse_index(html, &index_url()).unwrap();
        assert!(channel.entries.is_empty());
        assert_eq!(channel.description, "");
    }
}
