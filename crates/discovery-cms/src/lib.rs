//! CMS access for the Mining Discovery portal.
//!
//! Everything the portal knows about the outside world goes through this
//! crate: where the CMS lives, how each collection is addressed, how long
//! to wait, when to retry, and how a PDF lands on disk.
//!
//! # Modules
//!
//! - [`config`] -- Environment-driven connection settings
//! - [`error`] -- The [`CmsError`] taxonomy
//! - [`endpoints`] -- Request path builders for each collection
//! - [`backend`] -- HTTP and fixture transports behind [`CmsBackend`]
//! - [`client`] -- [`CmsClient`]: single-attempt fetch and envelope decoding
//! - [`retry`] -- [`fetch_with_retry`] and [`RetryPolicy`]
//! - [`download`] -- The fire-and-forget PDF download side effect

pub mod backend;
pub mod client;
pub mod config;
pub mod download;
pub mod endpoints;
pub mod error;
pub mod retry;

#[cfg(any(test, feature = "fixtures"))]
pub use backend::{FixtureBackend, FixtureReply};
pub use backend::{CmsBackend, HttpBackend, RawResponse};
pub use client::CmsClient;
pub use config::CmsConfig;
pub use download::{DownloadRequest, download_pdf, spawn_download};
pub use error::CmsError;
pub use retry::{RetryPolicy, fetch_with_retry};
