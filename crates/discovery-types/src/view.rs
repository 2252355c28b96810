//! View models rendered by the portal's components.
//!
//! Each value is owned by the component that fetched it and is replaced
//! wholesale on the next fetch cycle; nothing here is mutated after
//! construction. All types serialize so they can be handed to templates.

use serde::Serialize;

/// An article as shown in lists, grids, and tickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    /// Numeric row id.
    pub id: u64,
    /// Opaque external key; builds `#/article/<document_id>`.
    pub document_id: String,
    /// Headline.
    pub title: String,
    /// Teaser text.
    pub short_description: Option<String>,
    /// Selected image rendition.
    pub image_url: Option<String>,
    /// Byline.
    pub author: Option<String>,
    /// Raw publication timestamp.
    pub published_at: Option<String>,
    /// Publication date formatted for display.
    pub published_display: Option<String>,
    /// `ceil(words / 200)` over the article body.
    pub read_minutes: u32,
}

/// A full article with its related-articles sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDetail {
    /// Header fields.
    pub summary: ArticleSummary,
    /// Body, HTML-bearing.
    pub description: String,
    /// Other recent articles, never including this one.
    pub related_articles: Vec<ArticleSummary>,
}

/// Articles filed under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    /// Human-readable category name.
    pub category_name: String,
    /// Slug parsed from the route.
    pub slug: String,
    /// Newest first, in API order.
    pub articles: Vec<ArticleSummary>,
}

/// Which profile listing a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Executive profile.
    Ceo,
    /// Company profile.
    Company,
}

/// A CEO or company profile card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    /// Numeric row id.
    pub id: u64,
    /// CEO or company.
    pub kind: ProfileKind,
    /// Person or company name.
    pub name: String,
    /// Job title (CEO profiles only).
    pub designation: Option<String>,
    /// Teaser text.
    pub short_description: String,
    /// Portrait or cover image.
    pub image_url: Option<String>,
    /// Downloadable full profile.
    pub pdf_url: Option<String>,
    /// File name offered for the download.
    pub pdf_name: Option<String>,
    /// Long-form publication date (company profiles only).
    pub published_display: Option<String>,
}

/// One magazine issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagazineIssue {
    /// Numeric row id.
    pub id: u64,
    /// Issue title.
    pub title: String,
    /// Issue blurb.
    pub description: String,
    /// Cover date (falls back to the CMS publication timestamp).
    pub publish_date: Option<String>,
    /// Cover date formatted for display.
    pub publish_display: Option<String>,
    /// Selected cover rendition.
    pub cover_image_url: Option<String>,
    /// Downloadable issue.
    pub pdf_url: Option<String>,
    /// File name offered for the download.
    pub pdf_name: Option<String>,
}

/// A header menu entry pointing at a category route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    /// Menu label.
    pub name: String,
    /// Category slug.
    pub slug: String,
}

/// One month of the newsletter archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterMonth {
    /// Display label.
    pub name: String,
    /// Filter slug.
    pub slug: String,
}

/// One newsletter issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterIssue {
    /// Numeric row id.
    pub id: u64,
    /// Issue title.
    pub title: String,
    /// Issue summary.
    pub summary: String,
    /// Header image.
    pub image_url: Option<String>,
    /// Downloadable issue.
    pub pdf_url: Option<String>,
    /// Publication date formatted for display.
    pub published_display: Option<String>,
}

/// A home page advertisement slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advertisement {
    /// Numeric row id.
    pub id: u64,
    /// Advertiser or campaign name.
    pub title: String,
    /// Banner creative.
    pub image_url: Option<String>,
    /// Click-through target.
    pub link: Option<String>,
}
