use thiserror::Error;

/// Errors that can occur while constructing a connection handle.
///
/// The factory surfaces exactly one failure class: the handle could not be
/// established. Transport failures (unreachable host, TLS handshake, read
/// timeout) are not detected here; they surface from the caller's own
/// send/read, as `reqwest` errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectionError {
    /// The URL could not be parsed or the request object could not be
    /// assembled (for example, a header value containing control bytes).
    #[error("failed to establish connection handle: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON payload could not be serialized onto the handle.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying HTTP client could not be built.
    ///
    /// This typically only occurs in exceptional circumstances such as
    /// TLS backend initialization failures.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
