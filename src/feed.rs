//! Normalized feed model and the RSS 2.0 serialization shared by all providers.
//!
//! Every provider reduces its source document to a [`FeedChannel`]; the
//! serialization step is identical for all of them. Items are sorted by
//! descending publish date before the channel is built, so the order a
//! provider emitted them in never matters. Each item's link doubles as its
//! guid, with the permalink flag set.

use chrono::{DateTime, FixedOffset};
use rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

/// Channel metadata plus the chapter entries extracted from one source page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannel {
    /// Channel title, taken verbatim from the source page or API.
    pub title: String,
    /// Canonical URL of the source's index page for this work.
    pub link: String,
    /// Synopsis text; empty when the source omits it.
    pub description: String,
    /// Extracted entries, in whatever order the provider found them.
    pub entries: Vec<FeedEntry>,
}

/// A single chapter/episode entry.
///
/// Entries without a resolvable publish date never exist: providers skip
/// such candidates instead of constructing an entry with a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    /// Canonical per-chapter URL; also used verbatim as the guid.
    pub link: String,
    pub published: DateTime<FixedOffset>,
}

impl FeedChannel {
    /// Serialize into an RSS 2.0 channel, newest entries first.
    pub fn into_rss(mut self) -> Channel {
        self.entries.sort_by(|a, b| b.published.cmp(&a.published));
        let items: Vec<Item> = self.entries.into_iter().map(FeedEntry::into_rss_item).collect();

        ChannelBuilder::default()
            .title(self.title)
            .link(self.link)
            .description(self.description)
            .items(items)
            .build()
    }
}

impl FeedEntry {
    fn into_rss_item(self) -> Item {
        let guid = GuidBuilder::default()
            .value(self.link.clone())
            .permalink(true)
            .build();

        ItemBuilder::default()
            .title(Some(self.title))
            .link(Some(self.link))
            .pub_date(Some(self.published.to_rfc2822()))
            .guid(Some(guid))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(title: &str, link: &str, y: i32, m: u32, d: u32) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: link.to_string(),
            published: FixedOffset::east_opt(9 * 3600)
                .unwrap()
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn serializes_newest_first_regardless_of_input_order() {
        let channel = FeedChannel {
            title: "t".to_string(),
            link: "https://example.com/".to_string(),
            description: String::new(),
            entries: vec![
                entry("old", "https://example.com/1", 2021, 1, 1),
                entry("new", "https://example.com/3", 2023, 5, 5),
                entry("mid", "https://example.com/2", 2022, 2, 2),
            ],
        };

        let rss = channel.into_rss();
        let titles: Vec<_> = rss.items().iter().map(|i| i.title().unwrap()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn guid_equals_link_and_is_permalink() {
        let channel = FeedChannel {
            title: "t".to_string(),
            link: "https://example.com/".to_string(),
            description: String::new(),
            entries: vec![entry("ep", "https://example.com/ep/1", 2024, 6, 1)],
        };

        let rss = channel.into_rss();
        let item = &rss.items()[0];
        let guid = item.guid().unwrap();
        assert_eq!(guid.value(), item.link().unwrap());
        assert!(guid.is_permalink());
    }

    #[test]
    fn empty_channel_is_valid() {
        let channel = FeedChannel {
            title: "empty".to_string(),
            link: "https://example.com/".to_string(),
            description: "desc".to_string(),
            entries: Vec::new(),
        };

        let rss = channel.into_rss();
        assert_eq!(rss.items().len(), 0);
        assert_eq!(rss.title(), "empty");
        assert_eq!(rss.description(), "desc");
        assert!(rss.to_string().contains("<rss"));
    }

    #[test]
    fn pub_date_is_rfc2822() {
        let channel = FeedChannel {
            title: "t".to_string(),
            link: "https://example.com/".to_string(),
            description: String::new(),
            entries: vec![entry("ep", "https://example.com/ep/1", 2021, 1, 5)],
        };

        let rss = channel.into_rss();
        let pub_date = rss.items()[0].pub_date().unwrap();
        let parsed = DateTime::parse_from_rfc2822(pub_date).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2021-01-05T00:00:00+09:00");
    }
}
