use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, Request, Url};
use serde::Serialize;

use crate::errors::ConnectionError;

/// A configured but not-yet-executed HTTP request.
///
/// Produced by [`ConnectionFactory`](crate::ConnectionFactory). The handle
/// owns the underlying request exclusively; nothing is sent until the
/// caller extracts it with [`into_request`](Self::into_request) and
/// executes it. Connecting, writing, and reading all happen on the
/// caller's side, so an unreachable host is not detected at construction
/// time.
#[derive(Debug)]
pub struct Connection {
    request: Request,
    connect_timeout: Duration,
    read_timeout: Duration,
    output_enabled: bool,
}

impl Connection {
    pub(crate) fn new(
        request: Request,
        connect_timeout: Duration,
        read_timeout: Duration,
        output_enabled: bool,
    ) -> Self {
        Self {
            request,
            connect_timeout,
            read_timeout,
            output_enabled,
        }
    }

    /// Target URL of the request.
    #[must_use]
    pub fn url(&self) -> &Url {
        self.request.url()
    }

    /// HTTP method of the request.
    #[must_use]
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Headers applied to the request.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Connect timeout in force when the caller executes the request.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Read timeout in force when the caller executes the request.
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Whether the handle was constructed to carry a request payload.
    ///
    /// Set for attribution handles and for any handle a body has been
    /// attached to.
    #[must_use]
    pub const fn output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Serializes `payload` as JSON and attaches it as the request body.
    ///
    /// The factory's `Content-Type: application/json; utf-8` header is
    /// already in place; this only replaces the body.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Json`] if serialization fails.
    pub fn set_json_body<T: Serialize + ?Sized>(
        &mut self,
        payload: &T,
    ) -> Result<(), ConnectionError> {
        let bytes = serde_json::to_vec(payload)?;
        *self.request.body_mut() = Some(bytes.into());
        self.output_enabled = true;
        Ok(())
    }

    /// Releases the underlying request for execution.
    ///
    /// Execute it with the factory's client, for example
    /// `factory.http_client().execute(connection.into_request())`.
    #[must_use]
    pub fn into_request(self) -> Request {
        self.request
    }
}
