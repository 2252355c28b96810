//! Views for the Mining Discovery portal.
//!
//! Data-bound components fetch from the CMS, map records into view models,
//! and render one of a fixed set of region states. Pages compose
//! components; the [`PageHost`] keeps one page mounted per route.
//!
//! # Modules
//!
//! - [`loadable`] -- Region state machine and the last-request-wins guard
//! - [`render`] -- Template environment and region contexts
//! - [`components`] -- Feeds, listings, category, article, newsletter archive
//! - [`pages`] -- One [`Page`] per route kind
//! - [`host`] -- [`PageHost`]: route subscription, page swap, shell
//! - [`error`] -- The [`ViewError`] type

pub mod components;
pub mod error;
pub mod host;
pub mod loadable;
pub mod pages;
pub mod render;

pub use error::ViewError;
pub use host::PageHost;
pub use loadable::{FAILURE_MESSAGE, LoadCell, Loadable, Presentable, RegionStatus, RequestToken};
pub use pages::{HomePage, Page, StaticPage};
pub use render::{DEFAULT_SITE_URL, Renderer, TemplateSource};
