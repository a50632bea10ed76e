//! Pluggable HTTP transport.
//!
//! The client builds complete [`reqwest::Request`] values and hands them to a
//! [`Transport`]. `reqwest::Client` implements it directly, so the common case
//! is configuring a `reqwest::Client` (proxies, TLS, pool settings) and
//! passing it in an `Arc`.

use async_trait::async_trait;

/// Sends a fully built request and returns the raw response.
///
/// Implementations must be safe to share between concurrent callers; the
/// client never mutates or clones the transport behind its `Arc`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request.
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        reqwest::Client::execute(self, request).await
    }
}

/// Build the transport used when none is configured.
pub(crate) fn default_transport() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}
