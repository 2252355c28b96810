//! Pure projections from CMS records to view models.
//!
//! This is the boundary where network payloads are normalised. Missing
//! optional fields become `None` or an empty string; records that cannot
//! be rendered at all (an article without a `documentId` or title) are
//! skipped rather than failing the whole listing.

use std::cmp::Reverse;

use tracing::debug;

use crate::cms::{
    AdvertisementRecord, CategoryRecord, CeoRecord, CompanyRecord, MagazineRecord, NewsRecord,
    NewsletterCategoryRecord, NewsletterRecord,
};
use crate::media::{self, COVER_FORMATS, FormatName, HERO_FORMATS, PROFILE_FORMATS};
use crate::text::{long_date, read_minutes, timestamp_millis, title_case_slug};
use crate::view::{
    Advertisement, ArticleDetail, ArticleSummary, CategoryLink, CategoryListing, MagazineIssue,
    NewsletterIssue, NewsletterMonth, ProfileCard, ProfileKind,
};

/// Upper bound on related articles shown beside a detail page.
pub const MAX_RELATED_ARTICLES: usize = 15;

/// Trim a text field and drop it when blank.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Project one news record into a summary.
///
/// Returns `None` when the record lacks a `documentId` or a title, since
/// such an entry could neither be linked nor labelled.
pub fn article_summary(record: &NewsRecord, images: &[FormatName]) -> Option<ArticleSummary> {
    let Some(document_id) = non_blank(record.document_id.as_deref()) else {
        debug!(id = record.id, "skipping news record without documentId");
        return None;
    };
    let Some(title) = non_blank(record.title.as_deref()) else {
        debug!(document_id = document_id, "skipping news record without title");
        return None;
    };

    let body = record
        .description
        .as_deref()
        .or(record.short_description.as_deref())
        .unwrap_or_default();
    let published_at = non_blank(record.publish_on.as_deref())
        .or_else(|| non_blank(record.published_at.as_deref()));

    Some(ArticleSummary {
        id: record.id,
        document_id,
        title,
        short_description: non_blank(record.short_description.as_deref()),
        image_url: media::first_url(&record.image, images),
        author: non_blank(record.author.as_deref()),
        published_display: published_at.as_deref().and_then(long_date),
        published_at,
        read_minutes: read_minutes(body),
    })
}

/// Project a listing of news records, preserving API order.
pub fn article_summaries(records: &[NewsRecord], images: &[FormatName]) -> Vec<ArticleSummary> {
    records
        .iter()
        .filter_map(|r| article_summary(r, images))
        .collect()
}

/// Project the related-articles sidebar, excluding the current document.
pub fn related_articles(records: &[NewsRecord], current_document_id: &str) -> Vec<ArticleSummary> {
    records
        .iter()
        .filter(|r| r.document_id.as_deref() != Some(current_document_id))
        .filter_map(|r| article_summary(r, media::CARD_FORMATS))
        .take(MAX_RELATED_ARTICLES)
        .collect()
}

/// Project a detail record together with its already-fetched sidebar.
pub fn article_detail(record: &NewsRecord, related: Vec<ArticleSummary>) -> Option<ArticleDetail> {
    let summary = article_summary(record, HERO_FORMATS)?;
    Some(ArticleDetail {
        summary,
        description: record.description.clone().unwrap_or_default(),
        related_articles: related,
    })
}

/// Pick the category name for a listing.
///
/// Uses the first article's category whose slug matches, then that
/// article's first category, then the slug itself in title case.
pub fn category_name(slug: &str, records: &[NewsRecord]) -> String {
    let categories: &[CategoryRecord] = records
        .first()
        .map(|r| r.news_categories.as_slice())
        .unwrap_or_default();
    categories
        .iter()
        .find(|c| c.slug.as_deref() == Some(slug))
        .or_else(|| categories.first())
        .and_then(CategoryRecord::display_name)
        .map_or_else(|| title_case_slug(slug), ToOwned::to_owned)
}

/// Project a category page.
pub fn category_listing(slug: &str, records: &[NewsRecord]) -> CategoryListing {
    CategoryListing {
        category_name: category_name(slug, records),
        slug: slug.to_owned(),
        articles: article_summaries(records, media::CARD_FORMATS),
    }
}

/// Project the header menu, skipping categories without a slug.
pub fn category_links(records: &[CategoryRecord]) -> Vec<CategoryLink> {
    records
        .iter()
        .filter_map(|r| {
            let slug = non_blank(r.slug.as_deref())?;
            let name = r
                .display_name()
                .map_or_else(|| title_case_slug(&slug), ToOwned::to_owned);
            Some(CategoryLink { name, slug })
        })
        .collect()
}

/// Project a CEO profile card.
pub fn ceo_card(record: &CeoRecord) -> ProfileCard {
    let pdf = record.ceo_pdf.first();
    ProfileCard {
        id: record.id,
        kind: ProfileKind::Ceo,
        name: non_blank(record.name.as_deref()).unwrap_or_else(|| "Unknown".to_owned()),
        designation: Some(
            non_blank(record.designation.as_deref()).unwrap_or_else(|| "Executive".to_owned()),
        ),
        short_description: non_blank(record.short_description.as_deref()).unwrap_or_default(),
        image_url: media::first_url(&record.ceo_image, PROFILE_FORMATS)
            .or_else(|| media::first_url(&record.cover_image, media::CARD_FORMATS)),
        pdf_url: pdf.and_then(|p| p.best_url(&[FormatName::Original])),
        pdf_name: pdf.and_then(|p| non_blank(p.name.as_deref())),
        published_display: None,
    }
}

/// Project a company profile card.
pub fn company_card(record: &CompanyRecord) -> ProfileCard {
    let pdf = record.company_pdf.first();
    ProfileCard {
        id: record.id,
        kind: ProfileKind::Company,
        name: non_blank(record.title.as_deref()).unwrap_or_default(),
        designation: None,
        short_description: non_blank(record.short_description.as_deref()).unwrap_or_default(),
        image_url: media::first_url(&record.cover_image, media::CARD_FORMATS),
        pdf_url: pdf.and_then(|p| p.best_url(&[FormatName::Original])),
        pdf_name: pdf.and_then(|p| non_blank(p.name.as_deref())),
        published_display: record.published_at.as_deref().and_then(long_date),
    }
}

/// Project magazine issues, newest first.
///
/// Orders by `publishDate`, falling back to `publishedAt`. Issues with no
/// parseable date sort last; ties keep API order.
pub fn magazine_issues(records: &[MagazineRecord]) -> Vec<MagazineIssue> {
    let mut dated: Vec<(Option<i64>, MagazineIssue)> = records
        .iter()
        .map(|record| {
            let publish_date = non_blank(record.publish_date.as_deref())
                .or_else(|| non_blank(record.published_at.as_deref()));
            let sort_key = publish_date.as_deref().and_then(timestamp_millis);
            let pdf = record.pdf.first();
            let issue = MagazineIssue {
                id: record.id,
                title: non_blank(record.title.as_deref()).unwrap_or_default(),
                description: non_blank(record.description.as_deref()).unwrap_or_default(),
                publish_display: publish_date.as_deref().and_then(long_date),
                publish_date,
                cover_image_url: media::first_url(&record.cover_image, COVER_FORMATS),
                pdf_url: pdf.and_then(|p| p.best_url(&[FormatName::Original])),
                pdf_name: pdf.and_then(|p| non_blank(p.name.as_deref())),
            };
            (sort_key, issue)
        })
        .collect();
    dated.sort_by_key(|(key, _)| Reverse(key.unwrap_or(i64::MIN)));
    dated.into_iter().map(|(_, issue)| issue).collect()
}

/// Project newsletter archive months, skipping entries without a slug.
pub fn newsletter_months(records: &[NewsletterCategoryRecord]) -> Vec<NewsletterMonth> {
    records
        .iter()
        .filter_map(|r| {
            let slug = non_blank(r.slug.as_deref())?;
            let name = non_blank(r.name.as_deref())
                .or_else(|| non_blank(r.title.as_deref()))
                .unwrap_or_else(|| title_case_slug(&slug));
            Some(NewsletterMonth { name, slug })
        })
        .collect()
}

/// Project newsletter issues, skipping untitled entries.
pub fn newsletter_issues(records: &[NewsletterRecord]) -> Vec<NewsletterIssue> {
    records
        .iter()
        .filter_map(|r| {
            let title = non_blank(r.title.as_deref())?;
            Some(NewsletterIssue {
                id: r.id,
                title,
                summary: non_blank(r.short_description.as_deref())
                    .or_else(|| non_blank(r.description.as_deref()))
                    .unwrap_or_default(),
                image_url: media::first_url(&r.image, media::CARD_FORMATS),
                pdf_url: media::first_url(&r.pdf, &[FormatName::Original]),
                published_display: r.published_at.as_deref().and_then(long_date),
            })
        })
        .collect()
}

/// Project advertisement slots, skipping entries with neither creative nor title.
pub fn advertisements(records: &[AdvertisementRecord]) -> Vec<Advertisement> {
    records
        .iter()
        .filter_map(|r| {
            let image_url = media::first_url(&r.image, HERO_FORMATS);
            let title = non_blank(r.title.as_deref());
            if image_url.is_none() && title.is_none() {
                return None;
            }
            Some(Advertisement {
                id: r.id,
                title: title.unwrap_or_default(),
                image_url,
                link: non_blank(r.link.as_deref()),
            })
        })
        .collect()
}
