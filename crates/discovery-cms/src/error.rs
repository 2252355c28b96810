//! Error types for CMS access.
//!
//! Uses `thiserror` for typed errors that surface through every fetch:
//! configuration, transport, HTTP status, timeouts, and payload decoding.
//! Components map these onto their failure or not-found states; the
//! status code and transport detail are logged, never shown to readers.

/// Errors that can occur while talking to the CMS.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// DNS, connection, or body transfer failure.
    #[error("network error: {0}")]
    Network(String),

    /// A single attempt exceeded its deadline.
    #[error("request for {path} timed out after {timeout_ms}ms")]
    Timeout {
        /// Request path relative to the API root.
        path: String,
        /// The per-attempt deadline.
        timeout_ms: u64,
    },

    /// The CMS answered 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The CMS answered with any other non-success status.
    #[error("CMS returned HTTP {status} for {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path relative to the API root.
        path: String,
    },

    /// The body did not match the expected envelope.
    #[error("unexpected response shape for {path}: {reason}")]
    Decode {
        /// Request path relative to the API root.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// The body decoded but failed the call site's validity check
    /// (for example an empty list where content is required).
    #[error("response for {0} rejected by validation")]
    Rejected(String),

    /// Local file system failure while materialising a download.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CmsError {
    /// Whether this is a 404 from a detail lookup.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// A 404 or a configuration problem will not change between attempts.
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::Config(_) | Self::Io(_))
    }
}
