//! Configuration for the portal driver.
//!
//! All configuration is loaded from environment variables. The CMS
//! settings come from [`CmsConfig::from_env`]; this module adds where
//! templates and downloads live and the public site address.

use std::path::PathBuf;

use discovery_cms::CmsConfig;
use discovery_views::{DEFAULT_SITE_URL, TemplateSource};

use crate::error::PortalError;

/// Default directory for downloaded PDFs.
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Complete portal configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// CMS connection settings.
    pub cms: CmsConfig,
    /// Built-in templates, or a directory overriding them.
    pub templates: TemplateSource,
    /// Where PDF downloads are materialised.
    pub download_dir: PathBuf,
    /// Public address used in share links.
    pub site_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            cms: CmsConfig::default(),
            templates: TemplateSource::Builtin,
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            site_url: DEFAULT_SITE_URL.to_owned(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables (besides the `CMS_*` ones):
    /// - `PORTAL_TEMPLATES_DIR` -- override templates from this directory
    /// - `PORTAL_DOWNLOAD_DIR` -- download directory (default `downloads`)
    /// - `PORTAL_SITE_URL` -- public site address (default `https://miningdiscovery.com/`)
    pub fn from_env() -> Result<Self, PortalError> {
        let cms = CmsConfig::from_env()?;

        let templates = std::env::var("PORTAL_TEMPLATES_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map_or(TemplateSource::Builtin, |dir| {
                TemplateSource::Directory(PathBuf::from(dir))
            });

        let download_dir = std::env::var("PORTAL_DOWNLOAD_DIR")
            .unwrap_or_else(|_| DEFAULT_DOWNLOAD_DIR.to_owned());

        let site_url =
            std::env::var("PORTAL_SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_owned());
        validate_site_url(&site_url)?;

        Ok(Self {
            cms,
            templates,
            download_dir: PathBuf::from(download_dir),
            site_url,
        })
    }
}

/// Share links are absolute, so the site address must be too.
fn validate_site_url(site_url: &str) -> Result<(), PortalError> {
    if site_url.starts_with("https://") || site_url.starts_with("http://") {
        Ok(())
    } else {
        Err(PortalError::Config(format!(
            "PORTAL_SITE_URL must be an absolute http(s) URL, got {site_url:?}"
        )))
    }
}
