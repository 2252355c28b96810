//! The [`Route`] value and the fragment grammar.
//!
//! Parsing is total: every string maps to exactly one route and anything
//! unrecognised maps to [`Route::Home`]. Patterns are tried from most to
//! least specific: article detail, then category, then named pages.

use core::fmt;

/// Prefix of article detail fragments.
const ARTICLE_PREFIX: &str = "/article/";

/// Prefix of category listing fragments.
const CATEGORY_PREFIX: &str = "/news/";

/// A page of the portal, derived from the URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// The homepage. Also the fallback for unknown fragments.
    #[default]
    Home,
    /// Article detail, keyed by the CMS `documentId` (opaque, verbatim).
    Article(String),
    /// Articles filed under one category slug.
    Category(String),
    /// Magazine issues.
    Magazines,
    /// CEO profile listing.
    CeoProfiles,
    /// Company profile listing.
    CompanyProfiles,
    /// Services overview.
    Services,
    /// Investor campaign marketing.
    InvestorCampaigns,
    /// News syndication marketing.
    NewsSyndication,
    /// Digital branding marketing.
    DigitalBranding,
    /// Press office marketing.
    PressOffice,
    /// Conference media coverage marketing.
    ConferenceMedia,
    /// Newsletter e-mail blast marketing.
    NewsletterEmailBlast,
    /// About the publication.
    AboutUs,
    /// Contact form.
    ContactUs,
    /// Newsletter archive.
    NewsletterPage,
}

/// Named routes and their canonical paths, in menu order.
const NAMED_ROUTES: &[(&str, Route)] = &[
    ("/magazines", Route::Magazines),
    ("/ceo-profile", Route::CeoProfiles),
    ("/company-profile", Route::CompanyProfiles),
    ("/services", Route::Services),
    ("/investor-campaigns", Route::InvestorCampaigns),
    ("/news-syndication", Route::NewsSyndication),
    ("/digital-branding", Route::DigitalBranding),
    ("/press-office", Route::PressOffice),
    ("/conference-media", Route::ConferenceMedia),
    ("/newsletter-email-blast", Route::NewsletterEmailBlast),
    ("/about-us", Route::AboutUs),
    ("/contact-us", Route::ContactUs),
    ("/newsletter-page", Route::NewsletterPage),
];

impl Route {
    /// Parse a URL fragment (with or without the leading `#`).
    ///
    /// Never fails. Precedence: `#/article/<id>`, then `#/news/<slug>`
    /// (single segment only, so `#/news/a/b` is `Home`), then named pages.
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);

        if let Some(id) = path.strip_prefix(ARTICLE_PREFIX)
            && !id.is_empty()
        {
            return Self::Article(id.to_owned());
        }

        if let Some(slug) = path.strip_prefix(CATEGORY_PREFIX)
            && !slug.is_empty()
            && !slug.contains('/')
        {
            return Self::Category(slug.to_owned());
        }

        NAMED_ROUTES
            .iter()
            .find(|(named, _)| *named == path)
            .map_or(Self::Home, |(_, route)| route.clone())
    }

    /// Serialize back into a fragment, including the leading `#`.
    pub fn to_fragment(&self) -> String {
        match self {
            Self::Home => "#/".to_owned(),
            Self::Article(id) => format!("#{ARTICLE_PREFIX}{id}"),
            Self::Category(slug) => format!("#{CATEGORY_PREFIX}{slug}"),
            named => NAMED_ROUTES
                .iter()
                .find(|(_, route)| route == named)
                .map_or_else(|| "#/".to_owned(), |(path, _)| format!("#{path}")),
        }
    }

    /// Short stable name, used in logs and as the page key in templates.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Article(_) => "article",
            Self::Category(_) => "category",
            Self::Magazines => "magazines",
            Self::CeoProfiles => "ceo-profiles",
            Self::CompanyProfiles => "company-profiles",
            Self::Services => "services",
            Self::InvestorCampaigns => "investor-campaigns",
            Self::NewsSyndication => "news-syndication",
            Self::DigitalBranding => "digital-branding",
            Self::PressOffice => "press-office",
            Self::ConferenceMedia => "conference-media",
            Self::NewsletterEmailBlast => "newsletter-email-blast",
            Self::AboutUs => "about-us",
            Self::ContactUs => "contact-us",
            Self::NewsletterPage => "newsletter-page",
        }
    }

    /// Every route without a parameter, in menu order, plus `Home`.
    pub fn named() -> impl Iterator<Item = Self> {
        core::iter::once(Self::Home).chain(NAMED_ROUTES.iter().map(|(_, r)| r.clone()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unknown_fragments_are_home() {
        for fragment in ["", "#", "#/", "#/unknown", "/", "#/article/", "#/news/", "garbage"] {
            assert_eq!(Route::parse(fragment), Route::Home, "fragment {fragment:?}");
        }
    }

    #[test]
    fn article_fragment_parses_verbatim_id() {
        assert_eq!(
            Route::parse("#/article/abc123"),
            Route::Article("abc123".to_owned())
        );
        assert_eq!(
            Route::parse("#/article/a/b?c=d%20e"),
            Route::Article("a/b?c=d%20e".to_owned())
        );
    }

    #[test]
    fn article_wins_over_named_and_category_shapes() {
        assert_eq!(
            Route::parse("#/article/news/magazines"),
            Route::Article("news/magazines".to_owned())
        );
    }

    #[test]
    fn category_requires_single_segment() {
        assert_eq!(
            Route::parse("#/news/latest-news"),
            Route::Category("latest-news".to_owned())
        );
        assert_eq!(Route::parse("#/news/a/b"), Route::Home);
        assert_eq!(Route::parse("#/news/a/"), Route::Home);
    }

    #[test]
    fn named_routes_parse_with_or_without_hash() {
        assert_eq!(Route::parse("#/magazines"), Route::Magazines);
        assert_eq!(Route::parse("/magazines"), Route::Magazines);
        assert_eq!(Route::parse("#/ceo-profile"), Route::CeoProfiles);
        assert_eq!(Route::parse("#/company-profile"), Route::CompanyProfiles);
        assert_eq!(Route::parse("#/newsletter-page"), Route::NewsletterPage);
        assert_eq!(Route::parse("#/contact-us"), Route::ContactUs);
        assert_eq!(Route::parse("#/magazines/"), Route::Home);
        assert_eq!(Route::parse("#/digital-edition"), Route::Home);
    }

    #[test]
    fn every_route_round_trips() {
        let mut routes: Vec<Route> = Route::named().collect();
        routes.push(Route::Article("xyz".to_owned()));
        routes.push(Route::Article("A-b_c.d~e!$&'()*+,;=:@".to_owned()));
        routes.push(Route::Article("with/slash".to_owned()));
        routes.push(Route::Category("gold".to_owned()));
        for route in routes {
            assert_eq!(Route::parse(&route.to_fragment()), route, "route {route:?}");
        }
    }

    #[test]
    fn named_routes_have_distinct_fragments() {
        let fragments: Vec<String> = Route::named().map(|r| r.to_fragment()).collect();
        let mut deduped = fragments.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(fragments.len(), deduped.len());
        assert_eq!(fragments.len(), 14);
    }
}
