//! Article detail page.
//!
//! Loads one article by `documentId` and then the related-articles
//! sidebar. A 404, or a response whose `data` is null or absent, is a
//! not-found state rather than a failure. The sidebar is best effort: if it cannot be fetched the article
//! still renders with an empty sidebar.

use std::cell::RefCell;
use std::sync::Arc;

use discovery_cms::{CmsClient, CmsError, endpoints};
use discovery_router::Route;
use discovery_types::mapping::{article_detail, related_articles};
use discovery_types::{ArticleDetail, NewsRecord};
use serde::Serialize;
use tracing::{info, warn};
use urlencoding::encode;

use crate::error::ViewError;
use crate::loadable::{LoadCell, Loadable};
use crate::render::{Renderer, region_context};

/// Outbound share links for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    /// Facebook sharer.
    pub facebook: String,
    /// X (Twitter) intent.
    pub twitter: String,
    /// LinkedIn share.
    pub linkedin: String,
}

/// Build share links for the page at `site_url` + `fragment`.
pub fn share_links(site_url: &str, fragment: &str, title: &str) -> ShareLinks {
    let page = format!("{}/{fragment}", site_url.trim_end_matches('/'));
    let url = encode(&page);
    ShareLinks {
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        twitter: format!("https://twitter.com/intent/tweet?url={url}&text={}", encode(title)),
        linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
    }
}

/// The article detail page.
pub struct ArticleView {
    document_id: RefCell<String>,
    client: Arc<CmsClient>,
    cell: LoadCell<ArticleDetail>,
}

impl ArticleView {
    /// Create an idle view for `document_id`.
    pub fn new(document_id: &str, client: Arc<CmsClient>) -> Self {
        Self {
            document_id: RefCell::new(document_id.to_owned()),
            client,
            cell: LoadCell::new(),
        }
    }

    /// The article currently targeted.
    pub fn document_id(&self) -> String {
        self.document_id.borrow().clone()
    }

    /// Point the view at another article; supersedes any in-flight load.
    pub fn retarget(&self, document_id: &str) {
        info!(from = %self.document_id.borrow(), to = document_id, "article retargeted");
        document_id.clone_into(&mut self.document_id.borrow_mut());
        let _ = self.cell.begin();
    }

    /// Fetch the article, then its sidebar.
    pub async fn load(&self) {
        let document_id = self.document_id();
        let token = self.cell.begin();
        let result = self.fetch(&document_id).await;
        let outcome = Loadable::from_detail_result(result, "article");
        self.cell.settle(token, outcome);
    }

    async fn fetch(&self, document_id: &str) -> Result<ArticleDetail, CmsError> {
        let path = endpoints::article_detail(document_id);
        let record: Option<NewsRecord> = self.client.get_data(&path).await?;
        let Some(record) = record else {
            return Err(CmsError::NotFound(path));
        };

        let related = match self
            .client
            .get_data::<Vec<NewsRecord>>(&endpoints::related_articles())
            .await
        {
            Ok(records) => related_articles(&records, document_id),
            Err(e) => {
                warn!(document_id, error = %e, "related articles unavailable");
                Vec::new()
            }
        };

        article_detail(&record, related).ok_or_else(|| CmsError::Decode {
            path,
            reason: "article has no document id or title".to_owned(),
        })
    }

    /// Current state.
    pub fn state(&self) -> Loadable<ArticleDetail> {
        self.cell.snapshot()
    }

    /// Stop accepting responses.
    pub fn unmount(&self) {
        self.cell.unmount();
    }

    /// Render the page.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let document_id = self.document_id();
        let fragment = Route::Article(document_id.clone()).to_fragment();
        let (region, title) = self.cell.with_state(|state| {
            let title = state
                .data()
                .map(|d| d.summary.title.clone())
                .unwrap_or_default();
            (region_context("article", state), title)
        });
        let share = share_links(renderer.site_url(), &fragment, &title);
        renderer.render(
            "article.html",
            minijinja::context! {
                document_id => document_id,
                share => share,
                empty_text => "",
                ..region
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use discovery_cms::{CmsBackend, CmsConfig, FixtureBackend, FixtureReply};
    use serde_json::json;

    use super::*;

    const ID: &str = "sx6gn6ckwbiljfpq226eqzbz";

    fn client(fixtures: &FixtureBackend) -> Arc<CmsClient> {
        Arc::new(CmsClient::new(
            CmsBackend::Fixture(fixtures.clone()),
            CmsConfig::default(),
        ))
    }

    fn render(view: &ArticleView) -> String {
        Renderer::builtin()
            .and_then(|r| view.render(&r))
            .unwrap_or_default()
    }

    #[test]
    fn share_links_encode_the_article_address() {
        let links = share_links("https://miningdiscovery.com/", "#/article/abc", "Gold & more");
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fminingdiscovery.com%2F%23%2Farticle%2Fabc"
        );
        assert!(links.twitter.ends_with("&text=Gold%20%26%20more"));
        assert!(links.linkedin.contains("url=https%3A%2F%2Fminingdiscovery.com"));
    }

    #[tokio::test]
    async fn loads_detail_and_excludes_self_from_related() {
        let fixtures = FixtureBackend::new();
        fixtures
            .json(
                &endpoints::article_detail(ID),
                &json!({"data": {
                    "id": 7,
                    "documentId": ID,
                    "title": "Lithium prices climb",
                    "description": "<p>Body text</p>",
                }}),
            )
            .json(
                &endpoints::related_articles(),
                &json!({"data": [
                    {"id": 7, "documentId": ID, "title": "Lithium prices climb"},
                    {"id": 8, "documentId": "other", "title": "Nickel outlook"},
                ]}),
            );
        let view = ArticleView::new(ID, client(&fixtures));

        view.load().await;

        let related: Vec<String> = view
            .state()
            .data()
            .map(|d| d.related_articles.iter().map(|a| a.document_id.clone()).collect())
            .unwrap_or_default();
        assert_eq!(related, vec!["other"]);
        let html = render(&view);
        assert!(html.contains("<p>Body text</p>"));
        assert!(html.contains("Mining Discovery"));
        assert!(html.contains("share-linkedin"));
    }

    #[tokio::test]
    async fn unknown_article_is_not_found_with_way_home() {
        let fixtures = FixtureBackend::new();
        let view = ArticleView::new("missing", client(&fixtures));

        view.load().await;

        assert_eq!(view.state(), Loadable::NotFound);
        let html = render(&view);
        assert!(html.contains("region-not-found"));
        assert!(html.contains(r##"href="#/""##));
        assert!(!html.contains("region-error"));
    }

    #[tokio::test]
    async fn null_or_absent_data_is_not_found() {
        for body in [json!({"data": null}), json!({"meta": {}})] {
            let fixtures = FixtureBackend::new();
            fixtures.json(&endpoints::article_detail(ID), &body);
            let view = ArticleView::new(ID, client(&fixtures));

            view.load().await;

            assert_eq!(view.state(), Loadable::NotFound, "body {body}");
            assert!(render(&view).contains("region-not-found"));
            assert_eq!(fixtures.request_count(&endpoints::related_articles()), 0);
        }
    }

    #[tokio::test]
    async fn sidebar_failure_keeps_the_article() {
        let fixtures = FixtureBackend::new();
        fixtures
            .json(
                &endpoints::article_detail(ID),
                &json!({"data": {"id": 7, "documentId": ID, "title": "Copper"}}),
            )
            .push(&endpoints::related_articles(), FixtureReply::status(502));
        let view = ArticleView::new(ID, client(&fixtures));

        view.load().await;

        let detail = view.state();
        assert_eq!(detail.data().map(|d| d.related_articles.len()), Some(0));
        assert!(render(&view).contains("No related articles."));
    }

    #[tokio::test]
    async fn server_error_is_failure_not_not_found() {
        let fixtures = FixtureBackend::new();
        fixtures.push(&endpoints::article_detail(ID), FixtureReply::status(500));
        let view = ArticleView::new(ID, client(&fixtures));

        view.load().await;

        assert!(matches!(view.state(), Loadable::Failure(_)));
        assert!(render(&view).contains("region-error"));
    }
}
