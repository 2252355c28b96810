//! The CMS client: one attempt, one deadline, one decoded envelope.
//!
//! Every component fetch funnels through [`CmsClient::fetch_once`], which
//! applies the per-attempt timeout and maps the response onto the error
//! taxonomy. Retrying call sites wrap it with
//! [`fetch_with_retry`](crate::retry::fetch_with_retry).

use std::time::Duration;

use discovery_types::Envelope;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::backend::{CmsBackend, HttpBackend, RawResponse};
use crate::config::CmsConfig;
use crate::error::CmsError;
use crate::retry::{RetryPolicy, fetch_with_retry};

/// Client for the CMS REST API.
pub struct CmsClient {
    backend: CmsBackend,
    config: CmsConfig,
}

impl CmsClient {
    /// Create a client over an explicit backend.
    pub const fn new(backend: CmsBackend, config: CmsConfig) -> Self {
        Self { backend, config }
    }

    /// Create an HTTP client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Config`] if the HTTP backend cannot be built.
    pub fn from_config(config: CmsConfig) -> Result<Self, CmsError> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self::new(CmsBackend::Http(backend), config))
    }

    /// The configuration this client was built with.
    pub const fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Fetch `path` once under the default policy and return the envelope's
    /// `data`.
    ///
    /// # Errors
    ///
    /// See [`fetch_once`](Self::fetch_once).
    pub async fn get_data<T>(&self, path: &str) -> Result<T, CmsError>
    where
        T: DeserializeOwned,
    {
        fetch_with_retry(self, path, &RetryPolicy::single(&self.config), |_: &T| true).await
    }

    /// One attempt at `path` with the given deadline.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Timeout`] if the deadline passes first
    /// - [`CmsError::Network`] on transport failure
    /// - [`CmsError::NotFound`] on 404
    /// - [`CmsError::Status`] on any other non-2xx status
    /// - [`CmsError::Decode`] if the body is not a `{ "data": T }` envelope
    pub async fn fetch_once<T>(&self, path: &str, timeout: Duration) -> Result<T, CmsError>
    where
        T: DeserializeOwned,
    {
        let response = self.get_raw(path, timeout).await?;
        serde_json::from_slice::<Envelope<T>>(&response.body)
            .map(|envelope| envelope.data)
            .map_err(|e| CmsError::Decode {
                path: path.to_owned(),
                reason: e.to_string(),
            })
    }

    /// One attempt at `target` returning the raw body bytes.
    ///
    /// Used for binary assets such as PDF downloads.
    ///
    /// # Errors
    ///
    /// As [`fetch_once`](Self::fetch_once), minus decoding.
    pub async fn fetch_bytes(&self, target: &str) -> Result<Vec<u8>, CmsError> {
        self.get_raw(target, self.config.timeout)
            .await
            .map(|response| response.body)
    }

    async fn get_raw(&self, target: &str, timeout: Duration) -> Result<RawResponse, CmsError> {
        debug!(backend = self.backend.name(), target, "CMS request");

        let Ok(result) = tokio::time::timeout(timeout, self.backend.get(target)).await else {
            return Err(CmsError::Timeout {
                path: target.to_owned(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        };
        let response = result?;

        match response.status {
            404 => Err(CmsError::NotFound(target.to_owned())),
            status if !response.is_success() => Err(CmsError::Status {
                status,
                path: target.to_owned(),
            }),
            _ => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::backend::{FixtureBackend, FixtureReply};

    fn client_with(fixtures: &FixtureBackend) -> CmsClient {
        CmsClient::new(
            CmsBackend::Fixture(fixtures.clone()),
            CmsConfig::default(),
        )
    }

    #[tokio::test]
    async fn decodes_envelope_data() {
        let fixtures = FixtureBackend::new();
        fixtures.json("news-categories", &json!({"data": [{"name": "Gold"}]}));
        let client = client_with(&fixtures);

        let data: Result<Vec<serde_json::Value>, _> = client.get_data("news-categories").await;
        assert_eq!(data.map(|d| d.len()).ok(), Some(1));
    }

    #[tokio::test]
    async fn missing_data_is_a_decode_error() {
        let fixtures = FixtureBackend::new();
        fixtures.json("magazines?populate=*", &json!({"items": []}));
        let client = client_with(&fixtures);

        let data: Result<Vec<serde_json::Value>, _> = client.get_data("magazines?populate=*").await;
        assert!(matches!(data, Err(CmsError::Decode { .. })));
    }

    #[tokio::test]
    async fn wrong_container_kind_is_a_decode_error() {
        let fixtures = FixtureBackend::new();
        fixtures.json("magazines?populate=*", &json!({"data": {"id": 1}}));
        let client = client_with(&fixtures);

        let data: Result<Vec<serde_json::Value>, _> = client.get_data("magazines?populate=*").await;
        assert!(matches!(data, Err(CmsError::Decode { .. })));
    }

    #[tokio::test]
    async fn statuses_map_to_errors() {
        let fixtures = FixtureBackend::new();
        fixtures.push("a", FixtureReply::status(500));
        let client = client_with(&fixtures);

        let server_error: Result<serde_json::Value, _> = client.get_data("a").await;
        let missing: Result<serde_json::Value, _> = client.get_data("unknown").await;

        assert!(matches!(
            server_error,
            Err(CmsError::Status { status: 500, .. })
        ));
        assert!(matches!(missing, Err(CmsError::NotFound(p)) if p == "unknown"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_response_times_out() {
        let fixtures = FixtureBackend::new();
        fixtures.push(
            "slow",
            FixtureReply::json(&json!({"data": []})).delayed(Duration::from_secs(11)),
        );
        let client = client_with(&fixtures);

        let result: Result<Vec<serde_json::Value>, _> = client.get_data("slow").await;
        assert!(matches!(
            result,
            Err(CmsError::Timeout {
                timeout_ms: 10_000,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn bytes_skip_decoding() {
        let fixtures = FixtureBackend::new();
        fixtures.push(
            "https://cdn.example.com/a.pdf",
            FixtureReply::bytes(b"%PDF-1.7".to_vec()),
        );
        let client = client_with(&fixtures);

        let bytes = client
            .fetch_bytes("https://cdn.example.com/a.pdf")
            .await
            .unwrap_or_default();
        assert_eq!(bytes, b"%PDF-1.7");
    }
}
