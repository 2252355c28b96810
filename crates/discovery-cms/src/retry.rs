//! The shared retry utility.
//!
//! Every fetch goes through [`fetch_with_retry`]. Most call sites use
//! [`RetryPolicy::single`]: one attempt with the standard deadline. The
//! sponsored-posts feed uses [`RetryPolicy::sponsored`]: several attempts,
//! each with its own deadline, sleeping `backoff × attempt` in between.
//! The first response that decodes and passes the caller's acceptance
//! check wins.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::CmsClient;
use crate::config::CmsConfig;
use crate::error::CmsError;

/// How many times to try a fetch and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one.
    pub attempts: u32,
    /// Deadline for each attempt.
    pub timeout: Duration,
    /// Backoff unit; the wait after attempt `n` is `backoff × n`.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// One attempt with the configured deadline.
    pub const fn single(config: &CmsConfig) -> Self {
        Self {
            attempts: 1,
            timeout: config.timeout,
            backoff: Duration::ZERO,
        }
    }

    /// The sponsored-posts policy: configured attempts and backoff.
    pub const fn sponsored(config: &CmsConfig) -> Self {
        Self {
            attempts: config.retry_attempts,
            timeout: config.timeout,
            backoff: config.retry_backoff,
        }
    }

    /// Wait after a failed `attempt` (1-based).
    pub const fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

/// Fetch `path` under `policy`, returning the first accepted payload.
///
/// Each attempt is bounded by `policy.timeout`. A decoded payload for
/// which `accept` returns `false` counts as a failed attempt. Errors that
/// cannot change between attempts (see [`CmsError::is_retryable`]) end
/// the loop immediately.
///
/// # Errors
///
/// Returns the last attempt's error once attempts are exhausted, or
/// [`CmsError::Rejected`] if the last payload was refused by `accept`.
pub async fn fetch_with_retry<T, F>(
    client: &CmsClient,
    path: &str,
    policy: &RetryPolicy,
    accept: F,
) -> Result<T, CmsError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> bool,
{
    let attempts = policy.attempts.max(1);
    let mut last_error = CmsError::Rejected(path.to_owned());

    for attempt in 1..=attempts {
        match client.fetch_once::<T>(path, policy.timeout).await {
            Ok(data) if accept(&data) => {
                debug!(path, attempt, "CMS fetch accepted");
                return Ok(data);
            }
            Ok(_) => {
                warn!(path, attempt, attempts, "CMS response rejected");
                last_error = CmsError::Rejected(path.to_owned());
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                warn!(path, attempt, attempts, error = %e, "CMS fetch attempt failed");
                last_error = e;
            }
        }

        if attempt < attempts {
            tokio::time::sleep(policy.backoff_after(attempt)).await;
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::backend::{CmsBackend, FixtureBackend, FixtureReply};

    const PATH: &str = "news-sections?filters[news_categories][slug][$eq]=sponsored-post&sort=publishedAt:desc&pagination[limit]=6&populate=*";

    fn client_with(fixtures: &FixtureBackend) -> CmsClient {
        CmsClient::new(
            CmsBackend::Fixture(fixtures.clone()),
            CmsConfig::default(),
        )
    }

    #[allow(clippy::ptr_arg)]
    fn non_empty(items: &Vec<serde_json::Value>) -> bool {
        !items.is_empty()
    }

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::sponsored(&CmsConfig::default());
        assert_eq!(policy.attempts, 3);
        assert_eq!(policy.backoff_after(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_after(2), Duration::from_secs(2));
        assert_eq!(RetryPolicy::single(&CmsConfig::default()).attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_after_backoff() {
        let fixtures = FixtureBackend::new();
        fixtures
            .push(PATH, FixtureReply::network_error())
            .push(PATH, FixtureReply::status(503))
            .push(PATH, FixtureReply::json(&json!({"data": [{"id": 1}]})));
        let client = client_with(&fixtures);
        let policy = RetryPolicy::sponsored(client.config());

        let start = tokio::time::Instant::now();
        let result: Result<Vec<serde_json::Value>, _> =
            fetch_with_retry(&client, PATH, &policy, non_empty).await;

        assert_eq!(result.map(|d| d.len()).ok(), Some(1));
        assert_eq!(fixtures.request_count(PATH), 3);
        // 1s after the first failure, 2s after the second.
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_payloads_are_retried_then_rejected() {
        let fixtures = FixtureBackend::new();
        fixtures.json(PATH, &json!({"data": []}));
        let client = client_with(&fixtures);
        let policy = RetryPolicy::sponsored(client.config());

        let result: Result<Vec<serde_json::Value>, _> =
            fetch_with_retry(&client, PATH, &policy, non_empty).await;

        assert!(matches!(result, Err(CmsError::Rejected(_))));
        assert_eq!(fixtures.request_count(PATH), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn each_attempt_has_its_own_deadline() {
        let fixtures = FixtureBackend::new();
        fixtures
            .push(
                PATH,
                FixtureReply::json(&json!({"data": [{"id": 1}]})).delayed(Duration::from_secs(30)),
            )
            .push(PATH, FixtureReply::json(&json!({"data": [{"id": 2}]})));
        let client = client_with(&fixtures);
        let policy = RetryPolicy::sponsored(client.config());

        let result: Result<Vec<serde_json::Value>, _> =
            fetch_with_retry(&client, PATH, &policy, non_empty).await;

        let id = result
            .ok()
            .and_then(|d| d.first().and_then(|v| v.get("id")).and_then(serde_json::Value::as_u64));
        assert_eq!(id, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_last_error() {
        let fixtures = FixtureBackend::new();
        fixtures.push(PATH, FixtureReply::status(502));
        let client = client_with(&fixtures);
        let policy = RetryPolicy::sponsored(client.config());

        let result: Result<Vec<serde_json::Value>, _> =
            fetch_with_retry(&client, PATH, &policy, non_empty).await;

        assert!(matches!(result, Err(CmsError::Status { status: 502, .. })));
        assert_eq!(fixtures.request_count(PATH), 3);
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let fixtures = FixtureBackend::new();
        let client = client_with(&fixtures);
        let policy = RetryPolicy::sponsored(client.config());

        let result: Result<Vec<serde_json::Value>, _> =
            fetch_with_retry(&client, "news-sections/missing?populate=*", &policy, non_empty).await;

        assert!(matches!(result, Err(CmsError::NotFound(_))));
        assert_eq!(fixtures.requests().len(), 1);
    }
}
