//! Media objects attached to CMS records.
//!
//! Uploads arrive as `{ url, name, formats: { thumbnail, small, medium,
//! large } }`. Depending on the content type a field may hold a single
//! media object, an array of them, or `null`; [`one_or_many`] folds all of
//! those into a `Vec<Media>` so mapping code never has to care.

use serde::{Deserialize, Deserializer};

/// Named resolution inside a media object's `formats` map.
///
/// [`FormatName::Original`] refers to the top-level `url` of the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatName {
    /// 156px preview.
    Thumbnail,
    /// ~500px rendition.
    Small,
    /// ~750px rendition.
    Medium,
    /// ~1000px rendition.
    Large,
    /// The uploaded file itself.
    Original,
}

/// Preference for hero images and article headers.
pub const HERO_FORMATS: &[FormatName] = &[FormatName::Large, FormatName::Original];

/// Preference for cards in grids and lists.
pub const CARD_FORMATS: &[FormatName] = &[FormatName::Medium, FormatName::Original];

/// Preference for sponsored post cards.
pub const SPONSORED_FORMATS: &[FormatName] =
    &[FormatName::Original, FormatName::Medium, FormatName::Small];

/// Preference for magazine covers.
pub const COVER_FORMATS: &[FormatName] = &[
    FormatName::Large,
    FormatName::Medium,
    FormatName::Small,
    FormatName::Original,
];

/// Preference for small profile and company images.
pub const PROFILE_FORMATS: &[FormatName] = &[FormatName::Original, FormatName::Medium];

/// A single resolution inside `formats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaFormat {
    /// Absolute or CMS-relative URL of this rendition.
    #[serde(default)]
    pub url: Option<String>,
}

/// The `formats` map of a media object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaFormats {
    /// Thumbnail rendition.
    #[serde(default)]
    pub thumbnail: Option<MediaFormat>,
    /// Small rendition.
    #[serde(default)]
    pub small: Option<MediaFormat>,
    /// Medium rendition.
    #[serde(default)]
    pub medium: Option<MediaFormat>,
    /// Large rendition.
    #[serde(default)]
    pub large: Option<MediaFormat>,
}

/// An uploaded file (image or PDF) as returned with `populate=*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Media {
    /// URL of the original upload.
    #[serde(default)]
    pub url: Option<String>,
    /// Original file name.
    #[serde(default)]
    pub name: Option<String>,
    /// Generated renditions, present for images only.
    #[serde(default)]
    pub formats: Option<MediaFormats>,
}

impl Media {
    /// URL of one named rendition, if present and non-empty.
    pub fn format_url(&self, format: FormatName) -> Option<&str> {
        let url = match format {
            FormatName::Original => self.url.as_deref(),
            named => {
                let formats = self.formats.as_ref()?;
                let rendition = match named {
                    FormatName::Thumbnail => formats.thumbnail.as_ref(),
                    FormatName::Small => formats.small.as_ref(),
                    FormatName::Medium => formats.medium.as_ref(),
                    FormatName::Large | FormatName::Original => formats.large.as_ref(),
                };
                rendition.and_then(|r| r.url.as_deref())
            }
        };
        url.filter(|u| !u.is_empty())
    }

    /// First available URL following `preference`.
    pub fn best_url(&self, preference: &[FormatName]) -> Option<String> {
        preference
            .iter()
            .find_map(|format| self.format_url(*format))
            .map(ToOwned::to_owned)
    }
}

/// First available URL across a list of media objects.
pub fn first_url(media: &[Media], preference: &[FormatName]) -> Option<String> {
    media.first().and_then(|m| m.best_url(preference))
}

/// Deserialize a media field that may be an object, an array, or `null`.
///
/// Elements that are not media objects are dropped instead of failing the
/// whole record.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Media>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let media = match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<Media>(item).ok())
            .collect(),
        Some(item @ serde_json::Value::Object(_)) => {
            serde_json::from_value::<Media>(item).into_iter().collect()
        }
        _ => Vec::new(),
    };
    Ok(media)
}
