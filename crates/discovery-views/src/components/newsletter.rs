//! Newsletter archive page: a month selector over the issue list.
//!
//! Months and issues are independent regions. Choosing a month re-fetches
//! the issues with a month filter; rapid changes resolve to the last
//! selection because each fetch supersedes the previous one.

use std::cell::RefCell;
use std::sync::Arc;

use discovery_cms::{CmsClient, endpoints};
use discovery_types::mapping::{newsletter_issues, newsletter_months};
use discovery_types::{NewsletterCategoryRecord, NewsletterIssue, NewsletterMonth, NewsletterRecord};
use tracing::info;

use crate::error::ViewError;
use crate::loadable::{LoadCell, Loadable, load_into};
use crate::render::{Renderer, region_context};

/// The newsletter archive.
pub struct NewsletterArchive {
    client: Arc<CmsClient>,
    selected: RefCell<Option<String>>,
    months: LoadCell<Vec<NewsletterMonth>>,
    issues: LoadCell<Vec<NewsletterIssue>>,
}

impl NewsletterArchive {
    /// Create an idle archive showing every month.
    pub const fn new(client: Arc<CmsClient>) -> Self {
        Self {
            client,
            selected: RefCell::new(None),
            months: LoadCell::new(),
            issues: LoadCell::new(),
        }
    }

    /// The selected month slug, if any.
    pub fn selected(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    /// Fetch the month list and the issues for the current selection.
    pub async fn load(&self) {
        futures::join!(self.load_months(), self.load_issues());
    }

    /// Switch month (or back to all issues with `None`) and re-fetch issues.
    pub async fn select_month(&self, month: Option<String>) {
        info!(month = month.as_deref().unwrap_or("all"), "newsletter month selected");
        *self.selected.borrow_mut() = month;
        self.load_issues().await;
    }

    async fn load_months(&self) {
        let path = endpoints::newsletter_categories();
        let fetch = async {
            self.client
                .get_data::<Vec<NewsletterCategoryRecord>>(&path)
                .await
                .map(|records| newsletter_months(&records))
        };
        load_into(&self.months, "newsletter-months", fetch).await;
    }

    async fn load_issues(&self) {
        let path = endpoints::newsletters(self.selected().as_deref());
        let fetch = async {
            self.client
                .get_data::<Vec<NewsletterRecord>>(&path)
                .await
                .map(|records| newsletter_issues(&records))
        };
        load_into(&self.issues, "newsletter-issues", fetch).await;
    }

    /// Current issue state.
    pub fn issues(&self) -> Loadable<Vec<NewsletterIssue>> {
        self.issues.snapshot()
    }

    /// Current month list state.
    pub fn months(&self) -> Loadable<Vec<NewsletterMonth>> {
        self.months.snapshot()
    }

    /// Stop accepting responses.
    pub fn unmount(&self) {
        self.months.unmount();
        self.issues.unmount();
    }

    /// Render the page.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let months = self
            .months
            .with_state(|state| region_context("newsletter-months", state));
        let issues = self
            .issues
            .with_state(|state| region_context("newsletter-issues", state));
        renderer.render(
            "newsletter_archive.html",
            minijinja::context! {
                region => "newsletter-archive",
                months => months,
                issues => issues,
                selected => self.selected(),
                empty_text => "No newsletters were published for this selection.",
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use discovery_cms::{CmsBackend, CmsConfig, FixtureBackend, FixtureReply};
    use serde_json::json;

    use super::*;

    fn client(fixtures: &FixtureBackend) -> Arc<CmsClient> {
        Arc::new(CmsClient::new(
            CmsBackend::Fixture(fixtures.clone()),
            CmsConfig::default(),
        ))
    }

    fn issue(title: &str) -> serde_json::Value {
        json!({"data": [{"id": 1, "title": title}]})
    }

    fn titles(archive: &NewsletterArchive) -> Vec<String> {
        archive
            .issues()
            .data()
            .map(|i| i.iter().map(|n| n.title.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn loads_months_and_all_issues() {
        let fixtures = FixtureBackend::new();
        fixtures
            .json(
                &endpoints::newsletter_categories(),
                &json!({"data": [
                    {"id": 1, "name": "March 2025", "slug": "march-2025"},
                    {"id": 2, "slug": "april-2025"},
                ]}),
            )
            .json(&endpoints::newsletters(None), &issue("Weekly brief"));
        let archive = NewsletterArchive::new(client(&fixtures));

        archive.load().await;

        assert_eq!(titles(&archive), vec!["Weekly brief"]);
        let html = Renderer::builtin()
            .and_then(|r| archive.render(&r))
            .unwrap_or_default();
        assert!(html.contains("March 2025"));
        assert!(html.contains("April 2025"));
        assert!(html.contains("Weekly brief"));
    }

    #[tokio::test(start_paused = true)]
    async fn last_month_selection_wins() {
        let fixtures = FixtureBackend::new();
        fixtures
            .push(
                &endpoints::newsletters(Some("march-2025")),
                FixtureReply::json(&issue("March issue")).delayed(Duration::from_millis(400)),
            )
            .push(
                &endpoints::newsletters(Some("april-2025")),
                FixtureReply::json(&issue("April issue")).delayed(Duration::from_millis(50)),
            );
        let archive = NewsletterArchive::new(client(&fixtures));

        let march = archive.select_month(Some("march-2025".to_owned()));
        let april = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            archive.select_month(Some("april-2025".to_owned())).await;
        };
        futures::join!(march, april);

        assert_eq!(titles(&archive), vec!["April issue"]);
        assert_eq!(archive.selected().as_deref(), Some("april-2025"));
    }

    #[tokio::test]
    async fn month_failure_still_lists_issues() {
        let fixtures = FixtureBackend::new();
        fixtures
            .push(&endpoints::newsletter_categories(), FixtureReply::status(500))
            .json(&endpoints::newsletters(None), &issue("Weekly brief"));
        let archive = NewsletterArchive::new(client(&fixtures));

        archive.load().await;

        assert!(matches!(archive.months(), Loadable::Failure(_)));
        assert_eq!(titles(&archive), vec!["Weekly brief"]);
    }
}
