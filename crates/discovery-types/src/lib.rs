//! Shared type definitions for the Mining Discovery portal.
//!
//! This crate is the single source of truth for the shapes that cross the
//! CMS boundary and the shapes the view layer renders. Network payloads are
//! never handed to templates directly: every record passes through a pure
//! mapping function that normalises missing or oddly-typed fields first.
//!
//! # Modules
//!
//! - [`cms`] -- Response DTOs for the CMS REST endpoints
//! - [`view`] -- View models owned by the data-bound components
//! - [`mapping`] -- Pure DTO to view-model projections
//! - [`media`] -- Image format selection for media objects
//! - [`text`] -- Read-time and date display helpers

pub mod cms;
pub mod mapping;
pub mod media;
pub mod text;
pub mod view;

pub use cms::{
    AdvertisementRecord, CategoryRecord, CeoRecord, CompanyRecord, Envelope, MagazineRecord,
    NewsRecord, NewsletterCategoryRecord, NewsletterRecord,
};
pub use media::{FormatName, Media, MediaFormat, MediaFormats};
pub use view::{
    Advertisement, ArticleDetail, ArticleSummary, CategoryLink, CategoryListing, MagazineIssue,
    NewsletterIssue, NewsletterMonth, ProfileCard, ProfileKind,
};
