//! Magnet Novels (magnet-novels.com) API provider.
//!
//! The novel's metadata and its table of contents live behind two separate
//! private endpoints, both taking a `{"novel_id": ...}` POST body. The two
//! requests are independent, so they run concurrently and are awaited
//! jointly; the first failure propagates and the sibling result is dropped.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::dates;
use crate::error::{FeedError, Result};
use crate::feed::{FeedChannel, FeedEntry};
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider};
use crate::utils::{encode, json_id};

const INFO_API: &str = "https://www.magnet-novels.com/api/novel/reader/getNovelInfo";
const CONTENTS_API: &str = "https://www.magnet-novels.com/api/web/v2/reader/getNovelContents";

#[derive(Debug)]
pub struct MagnetNovels;

#[derive(Debug, Deserialize)]
struct NovelInfo {
    data: NovelInfoData,
}

#[derive(Debug, Deserialize)]
struct NovelInfoData {
    name: String,
    #[serde(default)]
    synopsis: String,
}

#[derive(Debug, Deserialize)]
struct NovelContents {
    #[serde(default)]
    data: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct Section {
    id: Option<Value>,
    title: Option<String>,
    /// Present once the section is published.
    public_time: Option<String>,
    /// Fallback stamp for sections republished after edits.
    latest_public_time: Option<String>,
}

#[async_trait::async_trait]
impl Provider for MagnetNovels {
    fn id(&self) -> &'static str {
        "magnet-novels.com"
    }

    #[instrument(level = "info", skip(self, client))]
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let payload = json!({ "novel_id": work_id });
        let (info_body, contents_body) = futures::try_join!(
            client.post_json(INFO_API, &payload),
            client.post_json(CONTENTS_API, &payload),
        )?;

        let channel = compose(&info_body, &contents_body, work_id)?;
        info!(count = channel.entries.len(), "Extracted Magnet Novels sections");
        Ok(FeedOutcome::Feed(channel))
    }
}

fn compose(info_body: &str, contents_body: &str, work_id: &str) -> Result<FeedChannel> {
    let info: NovelInfo = serde_json::from_str(info_body)
        .map_err(|e| FeedError::Parse(format!("magnet-novels: unexpected info response: {e}")))?;
    let contents: NovelContents = serde_json::from_str(contents_body).map_err(|e| {
        FeedError::Parse(format!("magnet-novels: unexpected contents response: {e}"))
    })?;

    let mut entries = Vec::new();
    for section in &contents.data {
        let Some(section_id) = section.id.as_ref().and_then(json_id) else {
            continue;
        };
        let Some(title) = &section.title else {
            continue;
        };
        let stamp = section.public_time.as_deref().or(section.latest_public_time.as_deref());
        let Some(published) = stamp.and_then(dates::parse_timestamp) else {
            warn!(section = %section_id, "Section without a parseable publish time; skipping");
            continue;
        };

        entries.push(FeedEntry {
            title: title.clone(),
            link: format!(
                "https://www.magnet-novels.com/novels/{}/episodes/{}",
                encode(work_id),
                encode(&section_id)
            ),
            published,
        });
    }

    Ok(FeedChannel {
        title: info.data.name,
        link: format!("https://www.magnet-novels.com/novels/{}", encode(work_id)),
        description: info.data.synopsis,
        entries,
    })
}
