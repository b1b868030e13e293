//! Per-site feed providers and the registry that resolves them.
//!
//! Each supported site gets one provider module that translates the site's
//! own document shape into the normalized [`FeedChannel`] model.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Storia Dash | [`storia`] | HTML scraping | Dates follow a literal 公開日 label |
//! | Gangan Online | [`ganganonline`] | Embedded JSON | Site renders client-side; data lives in `__NEXT_DATA__` |
//! | Urasunday | [`urasunday`] | HTML scraping | Strict row shape; one malformed row fails the fetch |
//! | Web Ace | [`webace`] | Redirect | The site publishes its own feeds; never fetches |
//! | ComicWalker | [`comicwalker`] | JSON API | Filters inactive episodes |
//! | Magnet Novels | [`magnet`] | JSON API | Two endpoints fetched concurrently |
//!
//! # Common Patterns
//!
//! HTML providers share one algorithm shape: build the index URL from the
//! work id, fetch and parse it, read channel metadata from fixed locations,
//! then walk candidate item nodes, skipping any that lack a link or a
//! parseable date. A feed with zero items is a valid result.

use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use scraper::{Html, Selector};

use crate::error::{FeedError, Result};
use crate::feed::FeedChannel;
use crate::fetch::SourceClient;

pub mod comicwalker;
pub mod ganganonline;
pub mod magnet;
pub mod storia;
pub mod urasunday;
pub mod webace;

/// What a provider hands back: either a composed feed, or an instruction to
/// point the client at a feed the source already publishes itself.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    Feed(FeedChannel),
    /// Serve no content; redirect the client to this URL instead.
    Redirect(String),
}

/// A single source site's scraper.
///
/// Implementations are stateless; shared plumbing (HTTP client, URL
/// encoding, date grammars) lives in free functions and the passed-in
/// [`SourceClient`].
#[async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Stable registry key, conventionally the source site's domain name.
    fn id(&self) -> &'static str;

    /// Fetch the chapter listing for `work_id` and normalize it.
    async fn fetch_feed(&self, client: &SourceClient, work_id: &str) -> Result<FeedOutcome>;
}

/// The fixed table of supported sources, keyed by provider id.
///
/// Built once at startup from an explicit list; never mutated afterwards, so
/// concurrent lookups are safe. Registering two providers under one id is a
/// programming error and panics during construction.
pub struct Registry {
    providers: HashMap<&'static str, Box<dyn Provider>>,
}

impl Registry {
    /// Build the registry with every supported provider.
    pub fn with_default_providers() -> Self {
        let mut registry = Self { providers: HashMap::new() };
        registry.register(Box::new(storia::Storia));
        registry.register(Box::new(ganganonline::GanganOnline));
        registry.register(Box::new(urasunday::UraSunday));
        registry.register(Box::new(webace::WebAce));
        registry.register(Box::new(comicwalker::ComicWalker));
        registry.register(Box::new(magnet::MagnetNovels));
        registry
    }

    fn register(&mut self, provider: Box<dyn Provider>) {
        let id = provider.id();
        let previous = self.providers.insert(id, provider);
        assert!(previous.is_none(), "duplicate provider id registered: {id}");
    }

    /// Look up the provider for `id`.
    pub fn resolve(&self, id: &str) -> Result<&dyn Provider> {
        self.providers
            .get(id)
            .map(|p| p.as_ref())
            .ok_or_else(|| FeedError::UnknownProvider(id.to_string()))
    }

    /// All registered provider ids, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        self.providers.keys().copied().sorted().collect()
    }
}

/// Text of the document's `<title>`, if it has a non-empty one.
pub(crate) fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Dummy(&'static str);

    #[async_trait]
    impl Provider for Dummy {
        fn id(&self) -> &'static str {
            self.0
        }

        async fn fetch_feed(&self, _client: &SourceClient, _work_id: &str) -> Result<FeedOutcome> {
            unreachable!("never fetched in registry tests")
        }
    }

    #[test]
    fn default_registry_resolves_every_supported_source() {
        let registry = Registry::with_default_providers();
        assert_eq!(
            registry.ids(),
            vec![
                "comic-walker.com",
                "ganganonline.com",
                "magnet-novels.com",
                "storia.takeshobo.co.jp",
                "urasunday.com",
                "web-ace.jp",
            ]
        );
        for id in registry.ids() {
            assert_eq!(registry.resolve(id).unwrap().id(), id);
        }
    }

    #[test]
    fn unknown_id_fails_without_invoking_any_provider() {
        let registry = Registry::with_default_providers();
        let err = registry.resolve("not-a-real-site.com").unwrap_err();
        assert!(matches!(err, FeedError::UnknownProvider(ref id) if id == "not-a-real-site.com"));
    }

    #[test]
    #[should_panic(expected = "duplicate provider id")]
    fn duplicate_registration_panics() {
        let mut registry = Registry { providers: HashMap::new() };
        registry.register(Box::new(Dummy("twice.example")));
        registry.register(Box::new(Dummy("twice.example")));
    }

    #[test]
    fn page_title_reads_the_title_element() {
        let document = Html::parse_document("<html><head><title> A Title </title></head></html>");
        assert_eq!(page_title(&document), Some("A Title".to_string()));

        let untitled = Html::parse_document("<html><head></head><body></body></html>");
        assert_eq!(page_title(&untitled), None);
    }
}
