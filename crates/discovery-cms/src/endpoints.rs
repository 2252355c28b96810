//! Request paths for every CMS collection the portal reads.
//!
//! Each builder returns one deterministic path relative to the API root:
//! a fixed collection path, a static query, and at most one filter derived
//! from a component prop. Prop values are percent-encoded so an arbitrary
//! slug or document id cannot alter the query.

use urlencoding::encode;

/// Maximum number of related articles shown beside an article.
pub const RELATED_LIMIT: usize = 15;

/// Maximum number of CEO profiles requested.
pub const CEO_PROFILE_LIMIT: usize = 100;

/// Latest articles in a category, newest first.
pub fn news_by_category(slug: &str, limit: usize) -> String {
    format!(
        "news-sections?filters[news_categories][slug][$eq]={}&sort=publishedAt:desc&pagination[limit]={limit}&populate=*",
        encode(slug)
    )
}

/// A single article by its opaque document id.
pub fn article_detail(document_id: &str) -> String {
    format!("news-sections/{}?populate=*", encode(document_id))
}

/// Latest articles across all categories, used for the related sidebar.
pub fn related_articles() -> String {
    format!("news-sections?sort=publishedAt:desc&pagination[limit]={RELATED_LIMIT}&populate=image")
}

/// News categories for the header menu.
pub fn categories(limit: usize) -> String {
    format!("news-categories?pagination[limit]={limit}")
}

/// CEO profiles, newest first.
pub fn ceo_profiles() -> String {
    format!("ceo-profiles?populate=*&pagination[limit]={CEO_PROFILE_LIMIT}&sort=publishedAt:desc")
}

/// Company profiles.
pub fn company_profiles() -> String {
    "company-profiles?populate=*".to_owned()
}

/// Magazine issues. Ordering is applied client-side.
pub fn magazines() -> String {
    "magazines?populate=*".to_owned()
}

/// Home page advertisements. The collection name is misspelled upstream.
pub fn advertisements() -> String {
    "home-advertisments?populate=*".to_owned()
}

/// Newsletter issues, optionally restricted to one month category.
pub fn newsletters(month: Option<&str>) -> String {
    match month {
        Some(slug) => format!(
            "post-newsletters?populate=*&filters[newsletter_category][slug][$eq]={}",
            encode(slug)
        ),
        None => "post-newsletters?populate=*".to_owned(),
    }
}

/// Newsletter month categories.
pub fn newsletter_categories() -> String {
    "newsletter-categories".to_owned()
}
