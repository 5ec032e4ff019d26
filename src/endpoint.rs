use std::time::Duration;

use reqwest::Method;

// --- URL construction ---

/// Base URL for the project-settings CDN.
pub const SETTINGS_BASE_URL: &str = "https://cdn-settings.segment.com";

/// Base URL for the upload and attribution API.
pub const API_BASE_URL: &str = "https://jpeg.sakari.ai";

/// Header name carrying the writeKey credential.
///
/// Using header-based authentication keeps the writeKey out of server
/// logs, proxy logs, and error messages containing URLs.
pub const AUTH_HEADER: &str = "X-AuthSakari";

/// Header name carrying the customer account identifier.
pub const ACCOUNT_ID_HEADER: &str = "X-AccountID";

/// Content type applied to every connection handle.
pub const CONTENT_TYPE_JSON: &str = "application/json; utf-8";

/// User-Agent applied to every connection handle, with the crate version
/// embedded.
pub const USER_AGENT: &str = concat!("sakari-analytics-rust/", env!("CARGO_PKG_VERSION"));

/// Default connect timeout applied to every connection handle.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default read timeout applied to every connection handle.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(20);

/// Base URLs the factory resolves endpoints against.
///
/// Defaults to the production hosts; overridable through
/// `ConnectionFactoryBuilder` so the SDK can be pointed at a proxy without
/// code changes.
#[derive(Debug, Clone)]
pub(crate) struct EndpointConfig {
    pub(crate) settings_base_url: String,
    pub(crate) api_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            settings_base_url: SETTINGS_BASE_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }
}

/// The three fixed analytics endpoints the factory knows how to reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Endpoint<'a> {
    /// Fetch JSON project settings for a writeKey.
    ProjectSettings { write_key: &'a str },
    /// Upload a batch of events.
    Upload,
    /// Fetch attribution data.
    Attribution,
}

impl Endpoint<'_> {
    /// Constructs the full URL for this endpoint against the given bases.
    pub(crate) fn url(&self, config: &EndpointConfig) -> String {
        match self {
            Self::ProjectSettings { write_key } => format!(
                "{}/v1/projects/{}/settings",
                config.settings_base_url, write_key
            ),
            Self::Upload => format!("{}/v1/batch", config.api_base_url),
            Self::Attribution => format!("{}/v1/attribution", config.api_base_url),
        }
    }

    /// HTTP method for this endpoint.
    pub(crate) fn method(&self) -> Method {
        match self {
            Self::ProjectSettings { .. } => Method::GET,
            Self::Upload | Self::Attribution => Method::POST,
        }
    }

    /// Whether handles for this endpoint are constructed with request-body
    /// output enabled.
    pub(crate) const fn output_enabled(&self) -> bool {
        matches!(self, Self::Attribution)
    }
}
