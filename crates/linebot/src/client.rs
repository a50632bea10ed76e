//! Main client implementation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Body, Method, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::api::{ChatsApi, MessagesApi, ProfilesApi};
use crate::endpoint::{self, join_path};
use crate::error::{Error, ErrorResponse, Result};
use crate::transport::{self, Transport};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("LINE-BotSDK-Rust/", env!("CARGO_PKG_VERSION"));

/// `Content-Type` sent with every POST request.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// LINE Messaging API client.
///
/// Immutable once built and cheap to clone; clones share credentials,
/// endpoint base and transport.
///
/// # Example
///
/// ```no_run
/// use linebot::{LineClient, Message, PushMessageRequest};
///
/// # async fn example() -> linebot::Result<()> {
/// let client = LineClient::builder("channel-secret", "channel-token").build()?;
///
/// let request = PushMessageRequest::new("U4af4980629...", vec![Message::text("hello")]);
/// client.messages().push(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LineClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    channel_secret: String,
    channel_token: String,
    /// Pre-built `Bearer` header, marked sensitive.
    authorization: HeaderValue,
    endpoint_base: Url,
    transport: Arc<dyn Transport>,
}

impl LineClient {
    /// Build a client from an explicit configuration.
    ///
    /// Validates the credentials, parses the endpoint base (or the default
    /// API root) and installs the configured or default transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let ClientConfig {
            channel_secret,
            channel_token,
            endpoint_base,
            transport,
        } = config;

        if channel_secret.is_empty() {
            return Err(Error::Config("missing channel secret".to_string()));
        }
        if channel_token.is_empty() {
            return Err(Error::Config("missing channel access token".to_string()));
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", channel_token))
            .map_err(|_| Error::Config("invalid channel access token".to_string()))?;
        authorization.set_sensitive(true);

        let endpoint_base = parse_endpoint_base(
            endpoint_base
                .as_deref()
                .unwrap_or(endpoint::API_ENDPOINT_BASE),
        )?;

        let transport: Arc<dyn Transport> = match transport {
            Some(transport) => transport,
            None => Arc::new(transport::default_transport()?),
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                channel_secret,
                channel_token,
                authorization,
                endpoint_base,
                transport,
            }),
        })
    }

    /// Create a client builder for the given channel credentials.
    pub fn builder(channel_secret: impl Into<String>, channel_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(channel_secret, channel_token)
    }

    /// The channel secret.
    pub fn channel_secret(&self) -> &str {
        &self.inner.channel_secret
    }

    /// The channel access token.
    pub fn channel_token(&self) -> &str {
        &self.inner.channel_token
    }

    /// The base every endpoint path is joined onto.
    pub fn endpoint_base(&self) -> &Url {
        &self.inner.endpoint_base
    }

    /// The transport requests are dispatched through.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the messages API (push, reply, multicast, content).
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    /// Access the group and room API.
    pub fn chats(&self) -> ChatsApi {
        ChatsApi::new(self.clone())
    }

    /// Access the profile API.
    pub fn profiles(&self) -> ProfilesApi {
        ProfilesApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Raw requests
    // ─────────────────────────────────────────────────────────────────────────

    /// Compose the absolute URL for an endpoint path.
    ///
    /// The endpoint is joined onto the base path; a query string on the
    /// endpoint is appended to any query the base already carries.
    pub fn url(&self, endpoint: &str) -> Url {
        let (path, query) = match endpoint.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (endpoint, None),
        };

        let mut url = self.inner.endpoint_base.clone();
        let joined = join_path(url.path(), path);
        url.set_path(&joined);

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let merged = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, query),
                _ => query.to_string(),
            };
            url.set_query(Some(&merged));
        }
        url
    }

    /// Send a GET request and return the raw response.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        self.send(None, Method::GET, endpoint, None).await
    }

    /// Send a GET request bound to a request context.
    pub async fn get_with(&self, ctx: &RequestContext, endpoint: &str) -> Result<Response> {
        self.send(Some(ctx), Method::GET, endpoint, None).await
    }

    /// Send a POST request with a JSON body and return the raw response.
    ///
    /// The body is passed through untouched; anything convertible into a
    /// [`reqwest::Body`] works, including [`Body::wrap_stream`].
    pub async fn post(&self, endpoint: &str, body: impl Into<Body>) -> Result<Response> {
        self.send(None, Method::POST, endpoint, Some(body.into())).await
    }

    /// Send a POST request bound to a request context.
    pub async fn post_with(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        body: impl Into<Body>,
    ) -> Result<Response> {
        self.send(Some(ctx), Method::POST, endpoint, Some(body.into())).await
    }

    pub(crate) async fn send(
        &self,
        ctx: Option<&RequestContext>,
        method: Method,
        endpoint: &str,
        body: Option<Body>,
    ) -> Result<Response> {
        let request = self.build_request(method, endpoint, body);
        self.dispatch(ctx, request).await
    }

    fn build_request(&self, method: Method, endpoint: &str, body: Option<Body>) -> Request {
        let mut request = Request::new(method, self.url(endpoint));

        let headers = request.headers_mut();
        headers.insert(header::AUTHORIZATION, self.inner.authorization.clone());
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

        if let Some(body) = body {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            *request.body_mut() = Some(body);
        }
        request
    }

    async fn dispatch(&self, ctx: Option<&RequestContext>, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "dispatching request");

        let sent = self.inner.transport.execute(request);
        let result = match ctx {
            Some(ctx) => ctx.run(sent).await,
            None => sent.await.map_err(Error::from),
        };

        match &result {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status().as_u16(), "received response");
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(%method, %url, error = %e, "request aborted");
            }
            Err(_) => {}
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typed helpers for the API groups
    // ─────────────────────────────────────────────────────────────────────────

    /// GET and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        ctx: Option<&RequestContext>,
        endpoint: &str,
    ) -> Result<T> {
        let response = self.send(ctx, Method::GET, endpoint, None).await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    /// POST a serialized body, expecting an empty JSON object back.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        ctx: Option<&RequestContext>,
        endpoint: &str,
        body: &B,
    ) -> Result<()> {
        let body = serde_json::to_vec(body)?;
        let response = self.send(ctx, Method::POST, endpoint, Some(body.into())).await?;
        self.check(response).await?;
        Ok(())
    }

    /// Pass successful responses through; turn failures into errors.
    pub(crate) async fn check(&self, response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: Response) -> Error {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(err) => match status {
                401 => Error::Auth(err.message),
                404 => Error::NotFound(err.message),
                _ => Error::Api {
                    status,
                    message: err.message,
                    details: err.details,
                },
            },
            Err(_) => Error::Api {
                status,
                message: format!("HTTP {}", status),
                details: Vec::new(),
            },
        }
    }
}

impl fmt::Debug for LineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineClient")
            .field("channel_secret", &"<redacted>")
            .field("channel_token", &"<redacted>")
            .field("endpoint_base", &self.inner.endpoint_base.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse an endpoint base as a strict absolute `http`/`https` URL.
fn parse_endpoint_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;

    let invalid = |reason: &str| Error::InvalidEndpointBase {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.fragment().is_some() {
        return Err(invalid("fragments are not allowed"));
    }
    Ok(url)
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Client configuration.
///
/// Only the credentials are required. `endpoint_base` defaults to
/// [`endpoint::API_ENDPOINT_BASE`]; `transport` defaults to a freshly built
/// `reqwest::Client` owned by the new client. Pass the same `Arc` to several
/// configurations to share one connection pool.
#[derive(Clone)]
pub struct ClientConfig {
    /// Channel secret.
    pub channel_secret: String,
    /// Channel access token.
    pub channel_token: String,
    /// Absolute API root.
    pub endpoint_base: Option<String>,
    /// Transport to dispatch requests through.
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientConfig {
    /// Configuration with credentials and every optional field unset.
    pub fn new(channel_secret: impl Into<String>, channel_token: impl Into<String>) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            channel_token: channel_token.into(),
            endpoint_base: None,
            transport: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("channel_secret", &"<redacted>")
            .field("channel_token", &"<redacted>")
            .field("endpoint_base", &self.endpoint_base)
            .field("transport", &self.transport.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Builder for creating a [`LineClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder for the given credentials.
    pub fn new(channel_secret: impl Into<String>, channel_token: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(channel_secret, channel_token),
        }
    }

    /// Set the API root.
    pub fn endpoint_base(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_base = Some(url.into());
        self
    }

    /// Set the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Use a configured `reqwest::Client` as the transport.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(Arc::new(client))
    }

    /// Build the client.
    pub fn build(self) -> Result<LineClient> {
        LineClient::new(self.config)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request context
// ─────────────────────────────────────────────────────────────────────────────

/// Per-call cancellation and deadline.
///
/// A request bound to a context is aborted when the token is cancelled
/// ([`Error::Cancelled`]) or the timeout elapses ([`Error::Timeout`]).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl RequestContext {
    /// An empty context: no cancellation point, no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the request when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Abort the request once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The cancellation token, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// The timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = reqwest::Result<T>>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result.map_err(Error::from),
                    Err(_) => Err(Error::Timeout(limit)),
                },
                None => fut.await.map_err(Error::from),
            }
        };

        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LineClient {
        LineClient::builder("testsecret", "testtoken").build().unwrap()
    }

    #[test]
    fn test_defaults() {
        let client = client();
        assert_eq!(client.channel_secret(), "testsecret");
        assert_eq!(client.channel_token(), "testtoken");
        assert_eq!(
            client.endpoint_base(),
            &Url::parse(endpoint::API_ENDPOINT_BASE).unwrap()
        );
    }

    #[test]
    fn test_requires_channel_secret() {
        let err = LineClient::builder("", "testtoken").build().unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == "missing channel secret"));
    }

    #[test]
    fn test_requires_channel_token() {
        let err = LineClient::builder("testsecret", "").build().unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == "missing channel access token"));
    }

    #[test]
    fn test_credentials_checked_before_options() {
        let err = LineClient::builder("", "testtoken")
            .endpoint_base("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = LineClient::builder("testsecret", "")
            .endpoint_base("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_token_unusable_as_header() {
        let err = LineClient::builder("testsecret", "bad\ntoken").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_custom_endpoint_base_round_trips() {
        for raw in [
            "https://example.test/",
            "http://127.0.0.1:8080/",
            "https://example.test/proxy/line",
            "https://example.test/base?key=value",
        ] {
            let client = LineClient::builder("testsecret", "testtoken")
                .endpoint_base(raw)
                .build()
                .unwrap();
            let want = Url::parse(raw).unwrap();
            assert_eq!(client.endpoint_base(), &want);
            assert_eq!(Url::parse(want.as_str()).unwrap(), want);
        }
    }

    #[test]
    fn test_last_endpoint_base_wins() {
        let client = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("https://first.test/")
            .endpoint_base("https://second.test/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint_base().as_str(), "https://second.test/");
    }

    #[test]
    fn test_rejects_malformed_endpoint_base() {
        let err = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("/relative/path")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("ftp://example.test/")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEndpointBase { .. }));

        let err = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("https://example.test/#frag")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEndpointBase { .. }));
    }

    #[test]
    fn test_transport_identity_is_preserved() {
        let transport: Arc<dyn Transport> = Arc::new(reqwest::Client::new());
        let client = LineClient::builder("testsecret", "testtoken")
            .transport(Arc::clone(&transport))
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(client.transport(), &transport));

        // Clones share the same transport.
        let cloned = client.clone();
        assert!(Arc::ptr_eq(cloned.transport(), &transport));
    }

    #[test]
    fn test_config_struct() {
        let transport: Arc<dyn Transport> = Arc::new(reqwest::Client::new());
        let config = ClientConfig {
            endpoint_base: Some("https://example.test/".to_string()),
            transport: Some(Arc::clone(&transport)),
            ..ClientConfig::new("testsecret", "testtoken")
        };
        let client = LineClient::new(config).unwrap();
        assert_eq!(client.endpoint_base().as_str(), "https://example.test/");
        assert!(Arc::ptr_eq(client.transport(), &transport));
    }

    #[test]
    fn test_url_building() {
        let client = client();
        assert_eq!(
            client.url(endpoint::PUSH_MESSAGE).as_str(),
            "https://api.line.me/v2/bot/message/push"
        );
        assert_eq!(
            client.url(&endpoint::profile("U123").unwrap()).as_str(),
            "https://api.line.me/v2/bot/profile/U123"
        );
    }

    #[test]
    fn test_url_building_keeps_base_path() {
        let client = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("https://example.test/proxy/")
            .build()
            .unwrap();
        assert_eq!(
            client.url("//v2/bot/message/reply").as_str(),
            "https://example.test/proxy/v2/bot/message/reply"
        );
    }

    #[test]
    fn test_url_building_merges_query() {
        let client = LineClient::builder("testsecret", "testtoken")
            .endpoint_base("https://example.test/?key=1")
            .build()
            .unwrap();
        assert_eq!(
            client.url("/v2/bot/followers/ids?start=abc").as_str(),
            "https://example.test/v2/bot/followers/ids?key=1&start=abc"
        );
        assert_eq!(
            client.url("/v2/bot/profile/U1").as_str(),
            "https://example.test/v2/bot/profile/U1?key=1"
        );
    }

    #[test]
    fn test_request_headers() {
        let client = client();

        let get = client.build_request(Method::GET, "/v2/bot/profile/U1", None);
        assert_eq!(get.headers()[header::AUTHORIZATION], "Bearer testtoken");
        assert!(get.headers()[header::AUTHORIZATION].is_sensitive());
        assert_eq!(get.headers()[header::USER_AGENT], USER_AGENT);
        assert!(get.headers().get(header::CONTENT_TYPE).is_none());
        assert!(get.body().is_none());

        let post = client.build_request(Method::POST, endpoint::PUSH_MESSAGE, Some(Body::from("{}")));
        assert_eq!(post.method(), Method::POST);
        assert_eq!(post.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(post.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn test_user_agent_names_sdk_and_version() {
        assert!(USER_AGENT.starts_with("LINE-BotSDK-Rust/"));
        assert!(USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("testtoken"));
        assert!(!rendered.contains("testsecret"));

        let rendered = format!("{:?}", ClientConfig::new("testsecret", "testtoken"));
        assert!(!rendered.contains("testtoken"));
    }
}
