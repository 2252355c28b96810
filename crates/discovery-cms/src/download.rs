//! The "download PDF" side effect.
//!
//! Fetches a binary asset, writes it to a temporary `.part` file inside the
//! download directory, then renames it into place. No retry. When spawned
//! with [`spawn_download`] the outcome is only logged; it never becomes
//! component state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::client::CmsClient;
use crate::error::CmsError;

/// File name used when neither the caller nor the URL supplies one.
const FALLBACK_NAME: &str = "document.pdf";

/// A PDF to fetch and the file name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Absolute or API-relative URL of the asset.
    pub url: String,
    /// Sanitised file name, always ending in `.pdf`.
    pub file_name: String,
}

impl DownloadRequest {
    /// Build a request, deriving the file name from `name` or the URL.
    pub fn new(url: &str, name: Option<&str>) -> Self {
        let raw = name
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| last_segment(url));
        Self {
            url: url.to_owned(),
            file_name: sanitize_file_name(&raw),
        }
    }
}

/// Last path segment of a URL, percent-decoded, without query or fragment.
fn last_segment(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    urlencoding::decode(segment)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| segment.to_owned())
}

/// Reduce `raw` to a safe single-component file name ending in `.pdf`.
fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return FALLBACK_NAME.to_owned();
    }
    if cleaned.to_ascii_lowercase().ends_with(".pdf") {
        cleaned.to_owned()
    } else {
        format!("{cleaned}.pdf")
    }
}

/// Fetch `request.url` and materialise it as `dir/request.file_name`.
///
/// The body is written to a hidden `.part` file first and renamed into
/// place, so a failed transfer never leaves a truncated PDF behind.
///
/// # Errors
///
/// Returns any fetch error from the client, or [`CmsError::Io`] if the
/// directory or file cannot be written.
pub async fn download_pdf(
    client: &CmsClient,
    request: &DownloadRequest,
    dir: &Path,
) -> Result<PathBuf, CmsError> {
    let bytes = client.fetch_bytes(&request.url).await?;

    tokio::fs::create_dir_all(dir).await?;
    let target = dir.join(&request.file_name);
    let partial = dir.join(format!(".{}.part", request.file_name));

    if let Err(e) = tokio::fs::write(&partial, &bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(e.into());
    }

    info!(
        url = request.url,
        path = %target.display(),
        bytes = bytes.len(),
        "PDF downloaded"
    );
    Ok(target)
}

/// Run [`download_pdf`] in the background. Failures are logged only.
pub fn spawn_download(
    client: Arc<CmsClient>,
    request: DownloadRequest,
    dir: PathBuf,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = download_pdf(&client, &request, &dir).await {
            warn!(url = request.url, error = %e, "PDF download failed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CmsBackend, FixtureBackend, FixtureReply};
    use crate::config::CmsConfig;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("discovery-cms-{name}-{}", std::process::id()))
    }

    #[test]
    fn file_name_from_url() {
        let request = DownloadRequest::new(
            "https://cms.example.com/uploads/March%202025%20Issue.pdf?v=2",
            None,
        );
        assert_eq!(request.file_name, "March_2025_Issue.pdf");
    }

    #[test]
    fn file_name_is_sanitised() {
        assert_eq!(
            DownloadRequest::new("x", Some("../../etc/passwd")).file_name,
            "_.._etc_passwd.pdf"
        );
        assert_eq!(DownloadRequest::new("https://h/", None).file_name, FALLBACK_NAME);
        assert_eq!(
            DownloadRequest::new("x", Some("Annual Report")).file_name,
            "Annual_Report.pdf"
        );
    }

    #[tokio::test]
    async fn download_writes_file_and_leaves_no_partial() {
        let fixtures = FixtureBackend::new();
        fixtures.push(
            "https://cdn.example.com/issue.pdf",
            FixtureReply::bytes(b"%PDF-1.7 test".to_vec()),
        );
        let client = CmsClient::new(CmsBackend::Fixture(fixtures), CmsConfig::default());
        let dir = scratch_dir("ok");
        let request = DownloadRequest::new("https://cdn.example.com/issue.pdf", None);

        let path = download_pdf(&client, &request, &dir).await;

        let written = match &path {
            Ok(p) => std::fs::read(p).unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        assert_eq!(written, b"%PDF-1.7 test");
        assert!(!dir.join(".issue.pdf.part").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failed_fetch_writes_nothing() {
        let client = CmsClient::new(
            CmsBackend::Fixture(FixtureBackend::new()),
            CmsConfig::default(),
        );
        let dir = scratch_dir("missing");
        let request = DownloadRequest::new("https://cdn.example.com/gone.pdf", None);

        let result = download_pdf(&client, &request, &dir).await;

        assert!(matches!(result, Err(CmsError::NotFound(_))));
        assert!(!dir.join("gone.pdf").exists());
    }

    #[tokio::test]
    async fn spawned_download_swallows_errors() {
        let client = Arc::new(CmsClient::new(
            CmsBackend::Fixture(FixtureBackend::new()),
            CmsConfig::default(),
        ));
        let dir = scratch_dir("spawned");
        let handle = spawn_download(
            client,
            DownloadRequest::new("https://cdn.example.com/gone.pdf", None),
            dir.clone(),
        );
        assert!(handle.await.is_ok());
        assert!(!dir.join("gone.pdf").exists());
    }
}
