//! Category listing page.
//!
//! The slug comes from the route. Moving from one category to another
//! retargets the same component rather than remounting it, so a slow
//! response for the previous slug must never overwrite the new one.

use std::cell::RefCell;
use std::sync::Arc;

use discovery_cms::{CmsClient, endpoints};
use discovery_types::mapping::category_listing;
use discovery_types::text::title_case_slug;
use discovery_types::{CategoryListing, NewsRecord};
use tracing::info;

use crate::error::ViewError;
use crate::loadable::{LoadCell, Loadable, load_into};
use crate::render::{Renderer, region_context};

/// `pagination[limit]` for category pages.
pub const CATEGORY_PAGE_LIMIT: usize = 24;

/// Articles filed under one category slug.
pub struct CategoryNews {
    slug: RefCell<String>,
    client: Arc<CmsClient>,
    cell: LoadCell<CategoryListing>,
}

impl CategoryNews {
    /// Create an idle page for `slug`.
    pub fn new(slug: &str, client: Arc<CmsClient>) -> Self {
        Self {
            slug: RefCell::new(slug.to_owned()),
            client,
            cell: LoadCell::new(),
        }
    }

    /// The slug currently targeted.
    pub fn slug(&self) -> String {
        self.slug.borrow().clone()
    }

    /// Point the page at another slug. The next [`load`](Self::load)
    /// fetches it; any in-flight load for the old slug is superseded.
    pub fn retarget(&self, slug: &str) {
        info!(from = %self.slug.borrow(), to = slug, "category retargeted");
        slug.clone_into(&mut self.slug.borrow_mut());
        let _ = self.cell.begin();
    }

    /// Fetch the current slug's articles.
    pub async fn load(&self) {
        let slug = self.slug();
        let path = endpoints::news_by_category(&slug, CATEGORY_PAGE_LIMIT);
        let fetch = async {
            self.client
                .get_data::<Vec<NewsRecord>>(&path)
                .await
                .map(|records| category_listing(&slug, &records))
        };
        load_into(&self.cell, "category", fetch).await;
    }

    /// Current state.
    pub fn state(&self) -> Loadable<CategoryListing> {
        self.cell.snapshot()
    }

    /// Stop accepting responses.
    pub fn unmount(&self) {
        self.cell.unmount();
    }

    /// Render the page.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let slug = self.slug();
        let (region, heading) = self.cell.with_state(|state| {
            let heading = state
                .data()
                .map_or_else(|| title_case_slug(&slug), |l| l.category_name.clone());
            (region_context("category", state), heading)
        });
        renderer.render(
            "category.html",
            minijinja::context! {
                slug => slug,
                heading => heading,
                empty_text => "No articles found in this category yet.",
                ..region
            },
        )
    }
}
