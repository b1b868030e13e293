//! ComicWalker (comic-walker.com) API provider.
//!
//! No HTML scraping here: the site exposes a JSON API with the work's
//! metadata and its latest episodes. Episodes the source flags inactive are
//! filtered out; episodes missing a code, title, or parseable timestamp are
//! skipped individually.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::dates;
use crate::error::{FeedError, Result};
use crate::feed::{FeedChannel, FeedEntry};
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider};
use crate::utils::encode;

#[derive(Debug)]
pub struct ComicWalker;

#[derive(Debug, Deserialize)]
struct WorkResponse {
    work: Work,
    #[serde(rename = "latestEpisodes")]
    latest_episodes: LatestEpisodes,
}

#[derive(Debug, Deserialize)]
struct Work {
    title: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct LatestEpisodes {
    result: Vec<Episode>,
}

#[derive(Debug, Deserialize)]
struct Episode {
    code: Option<String>,
    title: Option<String>,
    #[serde(rename = "isActive", default)]
    is_active: bool,
    #[serde(rename = "updateDate")]
    update_date: Option<String>,
}

#[async_trait::async_trait]
impl Provider for ComicWalker {
    fn id(&self) -> &'static str {
        "comic-walker.com"
    }

    #[instrument(level = "info", skip(self, client))]
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let api_url = format!(
            "https://comic-walker.com/api/contents/details/work?workCode={}",
            encode(work_id)
        );
        let body = client.get_text(&api_url).await?;
        let channel = parse_response(&body, work_id)?;
        info!(count = channel.entries.len(), "Extracted ComicWalker episodes");
        Ok(FeedOutcome::Feed(channel))
    }
}

fn parse_response(body: &str, work_id: &str) -> Result<FeedChannel> {
    let response: WorkResponse = serde_json::from_str(body)
        .map_err(|e| FeedError::Parse(format!("comic-walker: unexpected api response: {e}")))?;

    let mut entries = Vec::new();
    for episode in &response.latest_episodes.result {
        if !episode.is_active {
            continue;
        }
        let (Some(code), Some(title)) = (&episode.code, &episode.title) else {
            continue;
        };
        let Some(published) = episode.update_date.as_deref().and_then(dates::parse_timestamp)
        else {
            warn!(%code, "Episode without a parseable update date; skipping");
            continue;
        };

        entries.push(FeedEntry {
            title: title.clone(),
            link: format!(
                "https://comic-walker.com/detail/{}/episodes/{}?episodeType=first",
                encode(work_id),
                encode(code)
            ),
            published,
        });
    }

    Ok(FeedChannel {
        title: response.work.title,
        link: format!("https://comic-walker.com/detail/{}", encode(work_id)),
        description: response.work.summary,
        entries,
    })
}
