//! Web Ace (web-ace.jp) redirect provider.
//!
//! Web Ace already publishes an RSS feed per work, so there is nothing to
//! scrape. The work id is a `<section>:<id>` pair naming the site section
//! and the work within it; the provider deterministically maps it to the
//! site's own feed endpoint and never touches the network.

use crate::error::Result;
use crate::fetch::SourceClient;
use crate::providers::{FeedOutcome, Provider};
use crate::utils::encode;

#[derive(Debug)]
pub struct WebAce;

#[async_trait::async_trait]
impl Provider for WebAce {
    fn id(&self) -> &'static str {
        "web-ace.jp"
    }

    async fn fetch_feed(&self, _client: &SourceClient, work_id: &str) -> Result<FeedOutcome> {
        let (section, work) = work_id.split_once(':').unwrap_or((work_id, ""));
        Ok(FeedOutcome::Redirect(format!(
            "https://web-ace.jp/{}/feed/rss/{}/",
            encode(section),
            encode(work)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn redirects_to_the_sections_feed_endpoint() {
        let client = SourceClient::new();
        let outcome = WebAce.fetch_feed(&client, "youngace:contents-123").await.unwrap();
        assert_eq!(
            outcome,
            FeedOutcome::Redirect("https://web-ace.jp/youngace/feed/rss/contents-123/".to_string())
        );
    }

    #[tokio::test]
    async fn id_halves_are_url_encoded() {
        let client = SourceClient::new();
        let outcome = WebAce.fetch_feed(&client, "young ace:a/b").await.unwrap();
        assert_eq!(
            outcome,
            FeedOutcome::Redirect("https://web-ace.jp/young%20ace/feed/rss/a%2Fb/".to_string())
        );
    }

    #[tokio::test]
    async fn missing_separator_leaves_the_work_segment_empty() {
        let client = SourceClient::new();
        let outcome = WebAce.fetch_feed(&client, "youngace").await.unwrap();
        assert_eq!(
            outcome,
            FeedOutcome::Redirect("https://web-ace.jp/youngace/feed/rss//".to_string())
        );
    }
}
