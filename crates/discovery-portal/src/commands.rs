//! The work behind each subcommand, kept apart from argument parsing so it
//! can run against any CMS backend.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use discovery_cms::{CmsClient, DownloadRequest, download_pdf};
use discovery_router::{MemoryNavigation, NavigationPort, Route, RouteResolver};
use discovery_views::{PageHost, Renderer};
use tracing::info;

use crate::error::PortalError;

/// Mount a host at `#/`, apply `fragments` as navigation events in order,
/// load the resulting page, and return the full document.
pub async fn render_fragments(
    client: Arc<CmsClient>,
    renderer: Renderer,
    download_dir: PathBuf,
    fragments: &[String],
) -> Result<String, PortalError> {
    let port = MemoryNavigation::new(&Route::Home.to_fragment());
    let host = PageHost::new(
        RouteResolver::new(Rc::new(port.clone())),
        client,
        renderer,
        download_dir,
    );
    host.mount();

    for fragment in fragments {
        port.set_fragment(fragment);
    }
    info!(route = host.route().name(), "loading page");
    host.load().await;

    let html = host.render()?;
    host.unmount();
    Ok(html)
}

/// Fetch one PDF into `dir` and return where it landed.
pub async fn download(
    client: &CmsClient,
    url: &str,
    name: Option<&str>,
    dir: &Path,
) -> Result<PathBuf, PortalError> {
    let request = DownloadRequest::new(url, name);
    Ok(download_pdf(client, &request, dir).await?)
}

/// Every route without a parameter and its canonical fragment, plus the
/// two parameterised patterns.
pub fn routes_table() -> String {
    let mut out = String::new();
    for route in Route::named() {
        let _ = writeln!(out, "{:<24} {}", route.name(), route.to_fragment());
    }
    let _ = writeln!(out, "{:<24} #/article/<documentId>", "article");
    let _ = writeln!(out, "{:<24} #/news/<slug>", "category");
    out
}
