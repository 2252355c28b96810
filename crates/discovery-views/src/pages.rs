//! Page composition: one [`Page`] per route kind.
//!
//! [`Page::for_route`] is total over [`Route`], so the host never needs a
//! fallback branch. Pages delegate loading, rendering, and unmounting to
//! their components; the home page loads its regions concurrently.

use std::sync::Arc;

use discovery_cms::CmsClient;
use discovery_router::Route;
use discovery_types::{CeoRecord, CompanyRecord};
use futures::future::join_all;
use minijinja::Value;

use crate::components::feed::HOME_FEEDS;
use crate::components::listing::{self, ProfileListing};
use crate::components::{
    AdvertisementSlot, ArticleFeed, ArticleView, CategoryNews, MagazineListing, NewsletterArchive,
    NewsletterListing,
};
use crate::error::ViewError;
use crate::render::{Renderer, safe};

/// The home page: every feed plus the magazine, newsletter and ad strips.
pub struct HomePage {
    feeds: Vec<ArticleFeed>,
    magazine_strip: MagazineListing,
    newsletter_strip: NewsletterListing,
    advertisements: AdvertisementSlot,
}

impl HomePage {
    /// Create the home page with all regions idle.
    pub fn new(client: &Arc<CmsClient>) -> Self {
        Self {
            feeds: HOME_FEEDS
                .iter()
                .map(|spec| ArticleFeed::new(spec, Arc::clone(client)))
                .collect(),
            magazine_strip: listing::magazine_strip(Arc::clone(client)),
            newsletter_strip: listing::newsletter_strip(Arc::clone(client)),
            advertisements: listing::advertisement_slot(Arc::clone(client)),
        }
    }

    /// Load every region concurrently. Each region settles independently.
    pub async fn load(&self) {
        futures::join!(
            join_all(self.feeds.iter().map(ArticleFeed::load)),
            self.magazine_strip.load(),
            self.newsletter_strip.load(),
            self.advertisements.load(),
        );
    }

    fn unmount(&self) {
        for feed in &self.feeds {
            feed.unmount();
        }
        self.magazine_strip.unmount();
        self.newsletter_strip.unmount();
        self.advertisements.unmount();
    }

    fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        let mut regions = Vec::with_capacity(self.feeds.len().saturating_add(3));
        for feed in &self.feeds {
            regions.push((feed.spec().region, safe(feed.render(renderer)?)));
        }
        regions.push((
            self.magazine_strip.region(),
            safe(self.magazine_strip.render(renderer)?),
        ));
        regions.push((
            self.newsletter_strip.region(),
            safe(self.newsletter_strip.render(renderer)?),
        ));
        regions.push((
            self.advertisements.region(),
            safe(self.advertisements.render(renderer)?),
        ));
        renderer.render(
            "pages/home.html",
            minijinja::context! { regions => Value::from_iter(regions) },
        )
    }
}

/// A marketing page with no data dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPage {
    /// Template under `pages/`.
    pub template: &'static str,
    /// Document title.
    pub title: &'static str,
}

impl StaticPage {
    /// The static page for `route`, if it is one.
    pub const fn for_route(route: &Route) -> Option<Self> {
        let (template, title) = match route {
            Route::Services => ("pages/services.html", "Services"),
            Route::InvestorCampaigns => ("pages/investor_campaigns.html", "Investor Campaigns"),
            Route::NewsSyndication => ("pages/news_syndication.html", "News Syndication"),
            Route::DigitalBranding => ("pages/digital_branding.html", "Digital Branding"),
            Route::PressOffice => ("pages/press_office.html", "Press Office"),
            Route::ConferenceMedia => ("pages/conference_media.html", "Conference Media"),
            Route::NewsletterEmailBlast => {
                ("pages/newsletter_email_blast.html", "Newsletter Email Blast")
            }
            Route::AboutUs => ("pages/about_us.html", "About Us"),
            Route::ContactUs => ("pages/contact_us.html", "Contact Us"),
            _ => return None,
        };
        Some(Self { template, title })
    }
}

/// The page mounted for one route.
pub enum Page {
    /// `#/`
    Home(Box<HomePage>),
    /// `#/article/<documentId>`
    Article(Box<ArticleView>),
    /// `#/news/<slug>`
    Category(CategoryNews),
    /// `#/magazines`
    Magazines(MagazineListing),
    /// `#/ceo-profile`
    CeoProfiles(ProfileListing<CeoRecord>),
    /// `#/company-profile`
    CompanyProfiles(ProfileListing<CompanyRecord>),
    /// `#/newsletter-page`
    Newsletter(NewsletterArchive),
    /// Marketing pages.
    Static(StaticPage),
}

impl Page {
    /// Build the page for `route`. Total: every route maps to exactly one page.
    pub fn for_route(route: &Route, client: &Arc<CmsClient>) -> Self {
        if let Some(page) = StaticPage::for_route(route) {
            return Self::Static(page);
        }
        match route {
            Route::Article(id) => Self::Article(Box::new(ArticleView::new(id, Arc::clone(client)))),
            Route::Category(slug) => Self::Category(CategoryNews::new(slug, Arc::clone(client))),
            Route::Magazines => Self::Magazines(listing::magazines(Arc::clone(client))),
            Route::CeoProfiles => Self::CeoProfiles(listing::ceo_profiles(Arc::clone(client))),
            Route::CompanyProfiles => {
                Self::CompanyProfiles(listing::company_profiles(Arc::clone(client)))
            }
            Route::NewsletterPage => Self::Newsletter(NewsletterArchive::new(Arc::clone(client))),
            _ => Self::Home(Box::new(HomePage::new(client))),
        }
    }

    /// Apply a same-kind route as a prop change.
    ///
    /// Returns `false` when `route` needs a different page, in which case
    /// the caller unmounts this one and builds a new page.
    pub fn retarget(&self, route: &Route) -> bool {
        match (self, route) {
            (Self::Article(view), Route::Article(id)) => {
                view.retarget(id);
                true
            }
            (Self::Category(page), Route::Category(slug)) => {
                page.retarget(slug);
                true
            }
            _ => false,
        }
    }

    /// Fetch everything the page shows.
    pub async fn load(&self) {
        match self {
            Self::Home(page) => page.load().await,
            Self::Article(view) => view.load().await,
            Self::Category(page) => page.load().await,
            Self::Magazines(page) => page.load().await,
            Self::CeoProfiles(page) => page.load().await,
            Self::CompanyProfiles(page) => page.load().await,
            Self::Newsletter(page) => page.load().await,
            Self::Static(_) => {}
        }
    }

    /// Stop accepting responses for every region on the page.
    pub fn unmount(&self) {
        match self {
            Self::Home(page) => page.unmount(),
            Self::Article(view) => view.unmount(),
            Self::Category(page) => page.unmount(),
            Self::Magazines(page) => page.unmount(),
            Self::CeoProfiles(page) => page.unmount(),
            Self::CompanyProfiles(page) => page.unmount(),
            Self::Newsletter(page) => page.unmount(),
            Self::Static(_) => {}
        }
    }

    /// Render the page body.
    pub fn render(&self, renderer: &Renderer) -> Result<String, ViewError> {
        match self {
            Self::Home(page) => page.render(renderer),
            Self::Article(view) => view.render(renderer),
            Self::Category(page) => page.render(renderer),
            Self::Magazines(page) => page.render(renderer),
            Self::CeoProfiles(page) => page.render(renderer),
            Self::CompanyProfiles(page) => page.render(renderer),
            Self::Newsletter(page) => page.render(renderer),
            Self::Static(page) => renderer.render(page.template, minijinja::context! {}),
        }
    }

    /// Document title.
    pub fn title(&self) -> String {
        match self {
            Self::Home(_) => "Home".to_owned(),
            Self::Article(view) => view
                .state()
                .data()
                .map_or_else(|| "Article".to_owned(), |d| d.summary.title.clone()),
            Self::Category(page) => page
                .state()
                .data()
                .map_or_else(|| page.slug(), |l| l.category_name.clone()),
            Self::Magazines(_) => "Magazines".to_owned(),
            Self::CeoProfiles(_) => "CEO Profiles".to_owned(),
            Self::CompanyProfiles(_) => "Company Profiles".to_owned(),
            Self::Newsletter(_) => "Newsletter".to_owned(),
            Self::Static(page) => page.title.to_owned(),
        }
    }

    /// Stable page kind, used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Home(_) => "home",
            Self::Article(_) => "article",
            Self::Category(_) => "category",
            Self::Magazines(_) => "magazines",
            Self::CeoProfiles(_) => "ceo-profiles",
            Self::CompanyProfiles(_) => "company-profiles",
            Self::Newsletter(_) => "newsletter",
            Self::Static(_) => "static",
        }
    }
}
