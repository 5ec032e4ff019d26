//! Connection factory for the Sakari analytics API.
//!
//! [`ConnectionFactory`] constructs pre-configured HTTP requests for three
//! fixed endpoints: fetching project settings, uploading event batches,
//! and fetching attribution data. Each call returns a [`Connection`]
//! handle with the method, headers, and timeouts already applied; no
//! network I/O happens until the caller executes the request.
//!
//! The factory exists to customize how connections are created, for
//! example to point the SDK at your proxy server via
//! [`ConnectionFactory::builder`].
//!
//! # Example
//!
//! ```no_run
//! use sakari_analytics::ConnectionFactory;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ConnectionFactory::new()?;
//!
//! let mut conn = factory.upload("wk_123", "acct_9")?;
//! conn.set_json_body(&serde_json::json!({ "batch": [] }))?;
//!
//! let response = factory.http_client().execute(conn.into_request()).await?;
//! println!("upload status: {}", response.status());
//! # Ok(())
//! # }
//! ```

mod connection;
mod endpoint;
mod errors;
mod factory;

pub use connection::Connection;
pub use endpoint::{
    ACCOUNT_ID_HEADER, API_BASE_URL, AUTH_HEADER, CONTENT_TYPE_JSON, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_READ_TIMEOUT, SETTINGS_BASE_URL, USER_AGENT,
};
pub use errors::ConnectionError;
pub use factory::{ConnectionFactory, ConnectionFactoryBuilder};
