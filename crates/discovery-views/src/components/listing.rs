//! Single-fetch list components.
//!
//! Most regions fetch one fixed collection, project it with a pure mapping
//! function, and render it through one template. [`Listing`] captures that
//! shape once; the constructors below configure it for each region.

use std::sync::Arc;

use discovery_cms::{CmsClient, endpoints};
use discovery_types::mapping::{
    advertisements, category_links, ceo_card, company_card, magazine_issues, newsletter_issues,
};
use discovery_types::{
    Advertisement, AdvertisementRecord, CategoryLink, CategoryRecord, CeoRecord, CompanyRecord,
    MagazineIssue, MagazineRecord, NewsletterIssue, NewsletterRecord, ProfileCard,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ViewError;
use crate::loadable::{LoadCell, Loadable, load_into};
use crate::render::{Renderer, region_context};

/// Categories requested for the header menu.
pub const MENU_CATEGORY_LIMIT: usize = 8;

/// Issues shown in the home-page magazine strip.
pub const MAGAZINE_STRIP_ISSUES: usize = 3;

/// Issues shown in the home-page newsletter strip.
pub const NEWSLETTER_STRIP_ISSUES: usize = 3;

/// A region that fetches records `R` and renders view models `V`.
pub struct Listing<R, V> {
    region: &'static str,
    heading: &'static str,
    template: &'static str,
    empty_text: &'static str,
    path: String,
    map: fn(&[R]) -> Vec<V>,
    fallback: Option<fn() -> Vec<V>>,
    client: Arc<CmsClient>,
    cell: LoadCell<Vec<V>>,
}

impl<R, V> Listing<R, V>
where
    R: DeserializeOwned,
    V: Serialize + Clone,
{
    /// The request path this region issues.
    pub fn request_path(&self) -> &str {
        &self.path
    }

    /// Region name.
    pub const fn region(&self) -> &'static str {
        self.region
    }

    /// Fetch and map the collection.
    pub async fn load(&self) {
        let map = self.map;
        let fetch = async {
            self.client
                .get_data::<Vec<R>>(&self.path)
                .await
                .map(|records| map(&records))
        };
        load_into(&self.cell, self.region, fetch).await;
    }

    /// Current state.
    pub fn state(&self) -> Loadable<Vec<V>> {
        self.cell.snapshot()
    }

    /// Stop accepting responses.
    pub fn unmount(&self) {
        self.cell.unmount();
    }

    /// Render the region.
    ///
    /// Regions with a fallback render it in place of the error (and the
    /// empty) message, so they are never blank.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let region = self
            .cell
            .with_state(|state| region_context(self.region, state));
        let fallback = self.fallback.map(|f| f());
        renderer.render(
            self.template,
            minijinja::context! {
                heading => self.heading,
                empty_text => self.empty_text,
                fallback => fallback,
                ..region
            },
        )
    }
}

/// Header category menu; falls back to a fixed menu.
pub type CategoryMenu = Listing<CategoryRecord, CategoryLink>;

/// CEO or company profile listing.
pub type ProfileListing<R> = Listing<R, ProfileCard>;

/// Magazine issues, newest first.
pub type MagazineListing = Listing<MagazineRecord, MagazineIssue>;

/// Newsletter issues.
pub type NewsletterListing = Listing<NewsletterRecord, NewsletterIssue>;

/// Home-page advertisement slot.
pub type AdvertisementSlot = Listing<AdvertisementRecord, Advertisement>;

/// Menu entries shown when the category fetch fails.
fn fallback_menu() -> Vec<CategoryLink> {
    [
        ("LATEST NEWS", "latest-news"),
        ("MARKETS", "markets"),
        ("COMMODITIES", "commodities"),
    ]
    .into_iter()
    .map(|(name, slug)| CategoryLink {
        name: name.to_owned(),
        slug: slug.to_owned(),
    })
    .collect()
}

/// The header category menu.
pub fn category_menu(client: Arc<CmsClient>) -> CategoryMenu {
    Listing {
        region: "category-menu",
        heading: "",
        template: "category_menu.html",
        empty_text: "",
        path: endpoints::categories(MENU_CATEGORY_LIMIT),
        map: category_links,
        fallback: Some(fallback_menu),
        client,
        cell: LoadCell::new(),
    }
}

/// The CEO profiles page.
pub fn ceo_profiles(client: Arc<CmsClient>) -> ProfileListing<CeoRecord> {
    Listing {
        region: "ceo-profiles",
        heading: "CEO Profiles",
        template: "profiles.html",
        empty_text: "No CEO profiles have been published yet.",
        path: endpoints::ceo_profiles(),
        map: |records| records.iter().map(ceo_card).collect(),
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}

/// The company profiles page.
pub fn company_profiles(client: Arc<CmsClient>) -> ProfileListing<CompanyRecord> {
    Listing {
        region: "company-profiles",
        heading: "Company Profiles",
        template: "profiles.html",
        empty_text: "No company profiles have been published yet.",
        path: endpoints::company_profiles(),
        map: |records| records.iter().map(company_card).collect(),
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}

/// The magazines page.
pub fn magazines(client: Arc<CmsClient>) -> MagazineListing {
    Listing {
        region: "magazines",
        heading: "Magazines",
        template: "magazines.html",
        empty_text: "No magazine issues are available yet.",
        path: endpoints::magazines(),
        map: magazine_issues,
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}

/// The home-page magazine strip (latest issues and profile links).
pub fn magazine_strip(client: Arc<CmsClient>) -> MagazineListing {
    Listing {
        region: "magazine-strip",
        heading: "Mining Discovery Magazine",
        template: "magazine_strip.html",
        empty_text: "The next issue is on its way.",
        path: endpoints::magazines(),
        map: |records| {
            let mut issues = magazine_issues(records);
            issues.truncate(MAGAZINE_STRIP_ISSUES);
            issues
        },
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}

/// The home-page newsletter strip.
pub fn newsletter_strip(client: Arc<CmsClient>) -> NewsletterListing {
    Listing {
        region: "newsletter-strip",
        heading: "Newsletter",
        template: "newsletter_strip.html",
        empty_text: "No newsletters have been sent yet.",
        path: endpoints::newsletters(None),
        map: |records| {
            let mut issues = newsletter_issues(records);
            issues.truncate(NEWSLETTER_STRIP_ISSUES);
            issues
        },
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}

/// The home-page advertisement slot.
pub fn advertisement_slot(client: Arc<CmsClient>) -> AdvertisementSlot {
    Listing {
        region: "advertisements",
        heading: "",
        template: "advertisements.html",
        empty_text: "",
        path: endpoints::advertisements(),
        map: advertisements,
        fallback: None,
        client,
        cell: LoadCell::new(),
    }
}
