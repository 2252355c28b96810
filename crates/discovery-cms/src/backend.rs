//! Transport backends for the CMS client.
//!
//! Uses enum dispatch rather than trait objects because async methods
//! are not dyn-compatible. The HTTP backend talks to the real CMS over
//! `reqwest`; the fixture backend answers from canned responses and is
//! compiled for tests and for downstream crates that enable the
//! `fixtures` feature.

use crate::config::CmsConfig;
use crate::error::CmsError;

/// A response as seen by the client: status code and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A transport able to perform a `GET`.
pub enum CmsBackend {
    /// Real HTTP transport.
    Http(HttpBackend),
    /// Canned responses.
    #[cfg(any(test, feature = "fixtures"))]
    Fixture(FixtureBackend),
}

impl CmsBackend {
    /// Perform a `GET` for `target`.
    ///
    /// `target` is either a path relative to the API root
    /// (`news-sections?populate=*`) or an absolute `http(s)` URL, which is
    /// how media and PDF links arrive from the CMS.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Network`] if the transport fails. Non-success
    /// statuses are returned as responses, not errors.
    pub async fn get(&self, target: &str) -> Result<RawResponse, CmsError> {
        match self {
            Self::Http(backend) => backend.get(target).await,
            #[cfg(any(test, feature = "fixtures"))]
            Self::Fixture(backend) => backend.get(target).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            #[cfg(any(test, feature = "fixtures"))]
            Self::Fixture(_) => "fixture",
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

/// Backend for the CMS REST API over HTTP.
///
/// Sends requests to `{base_url}{path}`. Absolute URLs are requested as-is;
/// root-relative media paths (`/uploads/...`) resolve against the API's
/// origin.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpBackend {
    /// Create a backend for the configured API root.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Config`] if the base URL does not parse or the
    /// HTTP client cannot be built.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let base_url = reqwest::Url::parse(&config.base_url)
            .map_err(|e| CmsError::Config(format!("invalid CMS base URL: {e}")))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("discovery-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CmsError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Resolve a request target against the API root.
    fn resolve(&self, target: &str) -> Result<reqwest::Url, CmsError> {
        self.base_url
            .join(target)
            .map_err(|e| CmsError::Config(format!("cannot build URL for {target:?}: {e}")))
    }

    async fn get(&self, target: &str) -> Result<RawResponse, CmsError> {
        let url = self.resolve(target)?;
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json, application/pdf, */*")
            .send()
            .await
            .map_err(|e| CmsError::Network(format!("request for {target} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| CmsError::Network(format!("reading body for {target} failed: {e}")))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixture backend
// ---------------------------------------------------------------------------

#[cfg(any(test, feature = "fixtures"))]
pub use fixture::{FixtureBackend, FixtureReply};

#[cfg(any(test, feature = "fixtures"))]
mod fixture {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use super::RawResponse;
    use crate::error::CmsError;

    /// One canned reply.
    #[derive(Debug, Clone)]
    pub enum FixtureReply {
        /// Answer with a status and body after an optional delay.
        Respond {
            /// HTTP status code.
            status: u16,
            /// Body bytes.
            body: Vec<u8>,
            /// Simulated latency.
            delay: Duration,
        },
        /// Fail at the transport level after an optional delay.
        NetworkError {
            /// Simulated latency before the failure.
            delay: Duration,
        },
    }

    impl FixtureReply {
        /// A `200 OK` JSON reply.
        pub fn json(value: &serde_json::Value) -> Self {
            Self::Respond {
                status: 200,
                body: value.to_string().into_bytes(),
                delay: Duration::ZERO,
            }
        }

        /// A `200 OK` reply carrying raw bytes.
        pub const fn bytes(body: Vec<u8>) -> Self {
            Self::Respond {
                status: 200,
                body,
                delay: Duration::ZERO,
            }
        }

        /// A reply with the given status and an empty JSON object body.
        pub fn status(status: u16) -> Self {
            Self::Respond {
                status,
                body: b"{}".to_vec(),
                delay: Duration::ZERO,
            }
        }

        /// A transport failure.
        pub const fn network_error() -> Self {
            Self::NetworkError {
                delay: Duration::ZERO,
            }
        }

        /// The same reply, delivered after `delay`.
        #[must_use]
        pub fn delayed(self, delay: Duration) -> Self {
            match self {
                Self::Respond { status, body, .. } => Self::Respond {
                    status,
                    body,
                    delay,
                },
                Self::NetworkError { .. } => Self::NetworkError { delay },
            }
        }

        const fn delay(&self) -> Duration {
            match self {
                Self::Respond { delay, .. } | Self::NetworkError { delay } => *delay,
            }
        }
    }

    #[derive(Default)]
    struct FixtureState {
        replies: HashMap<String, VecDeque<FixtureReply>>,
        requests: Vec<String>,
    }

    /// In-memory backend answering from canned replies keyed by target.
    ///
    /// Replies queued for a target are consumed in order; the last one
    /// stays in place and answers every later request. Unknown targets get
    /// a 404. Cloning yields a handle onto the same fixture set, so tests
    /// can keep one to inspect [`requests`](Self::requests) after handing
    /// the other to a client.
    #[derive(Clone, Default)]
    pub struct FixtureBackend {
        state: Arc<Mutex<FixtureState>>,
    }

    impl FixtureBackend {
        /// Create an empty fixture set.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a reply for `target`.
        pub fn push(&self, target: &str, reply: FixtureReply) -> &Self {
            self.lock()
                .replies
                .entry(target.to_owned())
                .or_default()
                .push_back(reply);
            self
        }

        /// Queue a `200 OK` JSON reply for `target`.
        pub fn json(&self, target: &str, value: &serde_json::Value) -> &Self {
            self.push(target, FixtureReply::json(value))
        }

        /// Every target requested so far, in request order.
        pub fn requests(&self) -> Vec<String> {
            self.lock().requests.clone()
        }

        /// How many times `target` was requested.
        pub fn request_count(&self, target: &str) -> usize {
            self.lock().requests.iter().filter(|r| *r == target).count()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn next_reply(&self, target: &str) -> Option<FixtureReply> {
            let mut state = self.lock();
            state.requests.push(target.to_owned());
            let queue = state.replies.get_mut(target)?;
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        }

        pub(super) async fn get(&self, target: &str) -> Result<RawResponse, CmsError> {
            let Some(reply) = self.next_reply(target) else {
                return Ok(RawResponse {
                    status: 404,
                    body: br#"{"data":null,"error":{"status":404,"name":"NotFoundError"}}"#
                        .to_vec(),
                });
            };

            let delay = reply.delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match reply {
                FixtureReply::Respond { status, body, .. } => Ok(RawResponse { status, body }),
                FixtureReply::NetworkError { .. } => Err(CmsError::Network(format!(
                    "fixture connection reset for {target}"
                ))),
            }
        }
    }
}
