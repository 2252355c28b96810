//! Error types for the portal driver.
//!
//! Uses `thiserror` for the failures that can abort a command: bad
//! configuration, template problems, and CMS errors from a direct download.
//! Region fetch failures never reach this level; they render as region
//! states instead.

use discovery_cms::CmsError;
use discovery_views::ViewError;

/// Errors that can occur while running a portal command.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// A page or the shell failed to render.
    #[error("render error: {0}")]
    Render(#[from] ViewError),

    /// A CMS request or download failed.
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),
}
