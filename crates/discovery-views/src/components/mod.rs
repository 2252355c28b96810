//! Data-bound view components.
//!
//! Every component follows the same contract: build one request path,
//! load through a [`LoadCell`](crate::loadable::LoadCell), map records
//! with a pure function, and render one of the region states.

pub mod article;
pub mod category;
pub mod feed;
pub mod listing;
pub mod newsletter;

pub use article::{ArticleView, ShareLinks, share_links};
pub use category::{CATEGORY_PAGE_LIMIT, CategoryNews};
pub use feed::{ArticleFeed, FeedSpec, HOME_FEEDS};
pub use listing::{
    AdvertisementSlot, CategoryMenu, Listing, MagazineListing, NewsletterListing, ProfileListing,
};
pub use newsletter::NewsletterArchive;
