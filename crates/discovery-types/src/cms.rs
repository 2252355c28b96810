//! Response DTOs for the CMS REST API.
//!
//! Every endpoint answers with an envelope `{ "data": T }` where `T` is a
//! record or an array of records. The envelope itself is strict: a body
//! without `data`, or with the wrong container kind, fails to decode and
//! the calling component enters its failure state. Record fields are the
//! opposite: all optional, and text fields accept any JSON value (anything
//! that is not a string or number decodes as `None`).

use serde::{Deserialize, Deserializer};

use crate::media::{Media, one_or_many};

/// The `{ "data": ... }` wrapper around every CMS response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope<T> {
    /// The record or record list.
    pub data: T,
}

/// Decode a text field leniently.
///
/// Strings pass through, numbers are rendered, everything else (objects,
/// arrays, booleans, `null`) becomes `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a numeric id leniently (missing or non-numeric becomes `0`).
fn lenient_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()).unwrap_or_default())
}

/// Decode a relation that may be a single object, an array, or `null`.
fn relation_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Some(item @ serde_json::Value::Object(_)) => {
            serde_json::from_value(item).into_iter().collect()
        }
        _ => Vec::new(),
    })
}

/// A `news-sections` record (one article).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Stable external key used in article routes.
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    /// Headline.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Teaser text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    /// Body, HTML-bearing.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Byline.
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    /// CMS publication timestamp.
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    /// Editorial publication date, preferred over `publishedAt` when set.
    #[serde(default, deserialize_with = "lenient_string")]
    pub publish_on: Option<String>,
    /// Lead image.
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Media>,
    /// Categories the article is filed under.
    #[serde(default, deserialize_with = "relation_list")]
    pub news_categories: Vec<CategoryRecord>,
}

/// A `news-categories` record, also embedded in news records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Stable external key.
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    /// Display name as stored by the editors.
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Alternative display name field.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Route slug.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
}

impl CategoryRecord {
    /// Display name, preferring `category` over `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.category
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}

/// A `magazines` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MagazineRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Issue title.
    #[serde(default, rename = "Title", alias = "title", deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Issue blurb.
    #[serde(
        default,
        rename = "Description",
        alias = "description",
        deserialize_with = "lenient_string"
    )]
    pub description: Option<String>,
    /// Cover date chosen by the editors.
    #[serde(default, rename = "publishDate", deserialize_with = "lenient_string")]
    pub publish_date: Option<String>,
    /// CMS publication timestamp, used when `publishDate` is absent.
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    /// Cover image.
    #[serde(default, rename = "coverImage", deserialize_with = "one_or_many")]
    pub cover_image: Vec<Media>,
    /// Downloadable issue.
    #[serde(default, deserialize_with = "one_or_many")]
    pub pdf: Vec<Media>,
}

/// A `ceo-profiles` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CeoRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Stable external key.
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    /// Executive's name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Job title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub designation: Option<String>,
    /// Profile teaser.
    #[serde(default, rename = "shortDescription", deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    /// Portrait.
    #[serde(default, deserialize_with = "one_or_many")]
    pub ceo_image: Vec<Media>,
    /// Full profile PDFs.
    #[serde(default, deserialize_with = "one_or_many")]
    pub ceo_pdf: Vec<Media>,
    /// Cover images.
    #[serde(default, deserialize_with = "one_or_many")]
    pub cover_image: Vec<Media>,
}

/// A `company-profiles` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Stable external key.
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    /// Company name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Profile teaser.
    #[serde(default, rename = "shortDescription", deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    /// Full profile PDFs.
    #[serde(default, rename = "companyPdf", deserialize_with = "one_or_many")]
    pub company_pdf: Vec<Media>,
    /// Cover images.
    #[serde(default, deserialize_with = "one_or_many")]
    pub cover_image: Vec<Media>,
    /// CMS publication timestamp.
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
}

/// A `newsletter-categories` record (one archive month).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsletterCategoryRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Alternative display name field.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Filter slug.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
}

/// A `post-newsletters` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsletterRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Stable external key.
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    /// Issue title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Issue summary.
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    /// Longer body, used when no summary is set.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Header image.
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Media>,
    /// Downloadable issue.
    #[serde(default, deserialize_with = "one_or_many")]
    pub pdf: Vec<Media>,
    /// CMS publication timestamp.
    #[serde(default, rename = "publishedAt", deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
}

/// A `home-advertisments` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdvertisementRecord {
    /// Numeric row id.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    /// Advertiser or campaign name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Click-through target.
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    /// Banner creative.
    #[serde(default, deserialize_with = "one_or_many")]
    pub image: Vec<Media>,
}
