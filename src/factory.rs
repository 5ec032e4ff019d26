use std::time::Duration;

use reqwest::Client as ReqwestClient;
use reqwest::header;
use tracing::debug;

use crate::connection::Connection;
use crate::endpoint::{
    ACCOUNT_ID_HEADER, AUTH_HEADER, CONTENT_TYPE_JSON, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_READ_TIMEOUT, Endpoint, EndpointConfig, USER_AGENT,
};
use crate::errors::ConnectionError;

/// Builds pre-configured connection handles for the Sakari analytics API.
///
/// The factory holds only constant configuration and a `reqwest` client,
/// so it is cheap to clone and safe to share across threads. It can be
/// used to point the SDK at a proxy server: override the base URLs through
/// [`builder`](Self::builder) and every handle is constructed against the
/// proxy instead.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    http_client: ReqwestClient,
    config: EndpointConfig,
    connect_timeout: Duration,
    read_timeout: Duration,
}

/// Builder for [`ConnectionFactory`] instances.
///
/// # Example
///
/// ```
/// use sakari_analytics::ConnectionFactory;
/// use std::time::Duration;
///
/// let factory = ConnectionFactory::builder()
///     .api_base_url("https://proxy.example.com")
///     .connect_timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConnectionFactoryBuilder {
    settings_base_url: Option<String>,
    api_base_url: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl ConnectionFactoryBuilder {
    /// Overrides the base URL used for project-settings handles.
    ///
    /// A trailing slash is stripped. Defaults to
    /// [`SETTINGS_BASE_URL`](crate::SETTINGS_BASE_URL).
    #[must_use]
    pub fn settings_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings_base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Overrides the base URL used for upload and attribution handles.
    ///
    /// A trailing slash is stripped. Defaults to
    /// [`API_BASE_URL`](crate::API_BASE_URL).
    #[must_use]
    pub fn api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Overrides the connect timeout applied to every handle.
    ///
    /// This is the maximum time to wait for establishing a connection when
    /// the caller executes the request. Defaults to 15 seconds.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Overrides the read timeout applied to every handle.
    ///
    /// This is the maximum time a read on the response may idle before the
    /// caller's I/O fails. Defaults to 20 seconds.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Builds the `ConnectionFactory`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ClientBuild`] if the underlying HTTP
    /// client cannot be constructed, e.g. when the TLS backend fails to
    /// initialize.
    pub fn build(self) -> Result<ConnectionFactory, ConnectionError> {
        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        let read_timeout = self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT);

        let http_client = ReqwestClient::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .build()
            .map_err(|e| ConnectionError::ClientBuild(e.to_string()))?;

        let defaults = EndpointConfig::default();
        Ok(ConnectionFactory {
            http_client,
            config: EndpointConfig {
                settings_base_url: self
                    .settings_base_url
                    .unwrap_or(defaults.settings_base_url),
                api_base_url: self.api_base_url.unwrap_or(defaults.api_base_url),
            },
            connect_timeout,
            read_timeout,
        })
    }
}

impl ConnectionFactory {
    /// Creates a factory with default endpoints and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::ClientBuild`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new() -> Result<Self, ConnectionError> {
        Self::builder().build()
    }

    /// Creates a new builder for `ConnectionFactory` instances.
    #[must_use]
    pub fn builder() -> ConnectionFactoryBuilder {
        ConnectionFactoryBuilder::default()
    }

    /// The HTTP client configured with the factory's timeouts.
    ///
    /// Use it to execute handles: `factory.http_client().execute(conn.into_request())`.
    #[must_use]
    pub fn http_client(&self) -> &ReqwestClient {
        &self.http_client
    }

    /// Returns a connection handle that reads JSON project settings.
    ///
    /// The settings CDN is public, so no auth or account headers are set;
    /// `_account_id` is accepted only for symmetry with the other
    /// operations.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Http`] if the request cannot be
    /// assembled, e.g. from a malformed base URL override.
    pub fn project_settings(
        &self,
        write_key: &str,
        _account_id: &str,
    ) -> Result<Connection, ConnectionError> {
        let endpoint = Endpoint::ProjectSettings { write_key };
        let builder = self.open_connection(&endpoint);
        self.build_handle(builder, &endpoint)
    }

    /// Returns a connection handle that writes batched payloads to the
    /// upload endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Http`] if the request cannot be
    /// assembled, including header values containing control bytes.
    pub fn upload(
        &self,
        write_key: &str,
        account_id: &str,
    ) -> Result<Connection, ConnectionError> {
        self.authenticated_post(Endpoint::Upload, write_key, account_id)
    }

    /// Returns a connection handle that fetches attribution information.
    ///
    /// The handle is constructed with request-body output enabled, since
    /// this request sends a payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Http`] if the request cannot be
    /// assembled, including header values containing control bytes.
    pub fn attribution(
        &self,
        write_key: &str,
        account_id: &str,
    ) -> Result<Connection, ConnectionError> {
        self.authenticated_post(Endpoint::Attribution, write_key, account_id)
    }

    /// Shared path for the authenticated POST endpoints: adds the writeKey
    /// and account-identifier headers on top of the defaults.
    fn authenticated_post(
        &self,
        endpoint: Endpoint<'_>,
        write_key: &str,
        account_id: &str,
    ) -> Result<Connection, ConnectionError> {
        let builder = self
            .open_connection(&endpoint)
            .header(AUTH_HEADER, write_key)
            .header(ACCOUNT_ID_HEADER, account_id);
        self.build_handle(builder, &endpoint)
    }

    /// Configures the defaults shared by every handle: JSON content type
    /// and the crate User-Agent. Response-body reading is always enabled;
    /// the factory timeouts apply when the caller executes the request.
    /// Nothing is sent here.
    fn open_connection(&self, endpoint: &Endpoint<'_>) -> reqwest::RequestBuilder {
        self.http_client
            .request(endpoint.method(), endpoint.url(&self.config))
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(header::USER_AGENT, USER_AGENT)
    }

    fn build_handle(
        &self,
        builder: reqwest::RequestBuilder,
        endpoint: &Endpoint<'_>,
    ) -> Result<Connection, ConnectionError> {
        let request = builder.build()?;
        debug!(url = %request.url(), method = %request.method(), "built connection handle");
        Ok(Connection::new(
            request,
            self.connect_timeout,
            self.read_timeout,
            endpoint.output_enabled(),
        ))
    }
}
