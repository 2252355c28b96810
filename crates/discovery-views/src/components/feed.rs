//! Article feeds: every home-page region backed by one news category.
//!
//! A feed is fully described by a [`FeedSpec`]: the category slug it
//! filters on, how many records to request, which image rendition to
//! prefer, whether the fetch retries, and how many cards to show.

use std::sync::Arc;

use discovery_cms::{CmsClient, CmsError, RetryPolicy, endpoints, fetch_with_retry};
use discovery_types::mapping::article_summaries;
use discovery_types::media::{CARD_FORMATS, HERO_FORMATS, SPONSORED_FORMATS};
use discovery_types::{ArticleSummary, FormatName, NewsRecord};

use crate::error::ViewError;
use crate::loadable::{LoadCell, Loadable, load_into};
use crate::render::{Renderer, region_context};

/// Static configuration of one feed region.
#[derive(Debug)]
pub struct FeedSpec {
    /// Region name, used for logging and as the template's `region`.
    pub region: &'static str,
    /// Heading shown above the feed, if any.
    pub heading: Option<&'static str>,
    /// News category slug to filter on.
    pub category: &'static str,
    /// `pagination[limit]` for the request.
    pub limit: usize,
    /// Image rendition preference.
    pub images: &'static [FormatName],
    /// Use the retrying policy and reject responses with nothing to show.
    pub retry: bool,
    /// Maximum cards rendered.
    pub display: usize,
    /// Message for a successful but empty feed.
    pub empty_text: &'static str,
    /// Headlines shown instead of an error when the fetch fails.
    pub fallback: &'static [&'static str],
}

/// Lead story.
pub static HERO: FeedSpec = FeedSpec {
    region: "hero",
    heading: None,
    category: "hero-news",
    limit: 1,
    images: HERO_FORMATS,
    retry: false,
    display: 1,
    empty_text: "No lead story yet.",
    fallback: &[],
};

/// Featured stories beside the lead.
pub static LEFT_COLUMN: FeedSpec = FeedSpec {
    region: "left-column",
    heading: Some("Featured"),
    category: "featured-news",
    limit: 3,
    images: CARD_FORMATS,
    retry: false,
    display: 3,
    empty_text: "No featured stories yet.",
    fallback: &[],
};

/// Numbered trending list.
pub static TRENDING: FeedSpec = FeedSpec {
    region: "trending",
    heading: Some("Trending"),
    category: "trending-news",
    limit: 5,
    images: CARD_FORMATS,
    retry: false,
    display: 5,
    empty_text: "Nothing trending right now.",
    fallback: &[],
};

/// Latest-news grid.
pub static NEWS_GRID: FeedSpec = FeedSpec {
    region: "news-grid",
    heading: Some("Latest News"),
    category: "latest-news",
    limit: 6,
    images: CARD_FORMATS,
    retry: false,
    display: 6,
    empty_text: "No articles published yet.",
    fallback: &[],
};

/// Editor's picks.
pub static EDITORS_PICKS: FeedSpec = FeedSpec {
    region: "editors-picks",
    heading: Some("Editor's Picks"),
    category: "editors-pick",
    limit: 4,
    images: CARD_FORMATS,
    retry: false,
    display: 4,
    empty_text: "No picks this week.",
    fallback: &[],
};

/// Regional intelligence.
pub static REGIONAL: FeedSpec = FeedSpec {
    region: "regional",
    heading: Some("Regional Intelligence"),
    category: "regional-intelligence",
    limit: 4,
    images: CARD_FORMATS,
    retry: false,
    display: 4,
    empty_text: "No regional reports yet.",
    fallback: &[],
};

/// Sponsored posts: retried, untitled records skipped, two cards shown.
pub static SPONSORED: FeedSpec = FeedSpec {
    region: "sponsored",
    heading: Some("Sponsored"),
    category: "sponsored-post",
    limit: 6,
    images: SPONSORED_FORMATS,
    retry: true,
    display: 2,
    empty_text: "No sponsored posts.",
    fallback: &[],
};

/// Breaking-news ticker, with static headlines if the fetch fails.
pub static BREAKING: FeedSpec = FeedSpec {
    region: "breaking",
    heading: None,
    category: "breaking-news",
    limit: 5,
    images: CARD_FORMATS,
    retry: false,
    display: 5,
    empty_text: "No breaking news.",
    fallback: &[
        "Mining Discovery: news, markets and commodities from across the industry",
        "Subscribe to the Mining Discovery newsletter for weekly analysis",
    ],
};

/// Every home-page feed, in render order.
pub static HOME_FEEDS: [&FeedSpec; 8] = [
    &BREAKING,
    &LEFT_COLUMN,
    &HERO,
    &TRENDING,
    &NEWS_GRID,
    &EDITORS_PICKS,
    &REGIONAL,
    &SPONSORED,
];

/// One feed region.
pub struct ArticleFeed {
    spec: &'static FeedSpec,
    client: Arc<CmsClient>,
    cell: LoadCell<Vec<ArticleSummary>>,
}

impl ArticleFeed {
    /// Create an idle feed.
    pub const fn new(spec: &'static FeedSpec, client: Arc<CmsClient>) -> Self {
        Self {
            spec,
            client,
            cell: LoadCell::new(),
        }
    }

    /// The feed's configuration.
    pub const fn spec(&self) -> &'static FeedSpec {
        self.spec
    }

    /// The request path this feed issues.
    pub fn request_path(&self) -> String {
        endpoints::news_by_category(self.spec.category, self.spec.limit)
    }

    /// Fetch and map the feed.
    pub async fn load(&self) {
        let spec = self.spec;
        let path = self.request_path();
        let client = &self.client;

        let fetch = async {
            let records: Vec<NewsRecord> = if spec.retry {
                let policy = RetryPolicy::sponsored(client.config());
                fetch_with_retry(client, &path, &policy, |records: &Vec<NewsRecord>| {
                    !article_summaries(records, spec.images).is_empty()
                })
                .await?
            } else {
                client.get_data(&path).await?
            };
            let mut articles = article_summaries(&records, spec.images);
            articles.truncate(spec.display);
            Ok::<_, CmsError>(articles)
        };

        load_into(&self.cell, spec.region, fetch).await;
    }

    /// Current state.
    pub fn state(&self) -> Loadable<Vec<ArticleSummary>> {
        self.cell.snapshot()
    }

    /// Stop accepting responses.
    pub fn unmount(&self) {
        self.cell.unmount();
    }

    /// Render the region.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let region = self
            .cell
            .with_state(|state| region_context(self.spec.region, state));
        renderer.render(
            "feed.html",
            minijinja::context! {
                heading => self.spec.heading,
                empty_text => self.spec.empty_text,
                fallback => self.spec.fallback,
                ..region
            },
        )
    }
}
