//! HTTP client for the LINE Messaging API.
//!
//! The core is [`LineClient`]: it holds the channel credentials and an
//! endpoint base, composes absolute URLs, attaches the `Authorization` and
//! `User-Agent` headers and hands each request to a pluggable [`Transport`].
//! [`LineClient::get`] and [`LineClient::post`] return the raw response; the
//! grouped accessors ([`LineClient::messages`], [`LineClient::chats`],
//! [`LineClient::profiles`]) encode requests and decode responses on top.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use linebot::{LineClient, RequestContext, endpoint};
//!
//! # async fn example() -> linebot::Result<()> {
//! let client = LineClient::builder("channel-secret", "channel-token").build()?;
//!
//! // Typed access
//! let profile = client.profiles().get("U4af4980629...").await?;
//! println!("{}", profile.display_name);
//!
//! // Raw access, bounded by a deadline
//! let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
//! let response = client
//!     .get_with(&ctx, &endpoint::profile("U4af4980629...")?)
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! Retries, webhook signature verification and response streaming are not
//! provided; every failure is returned to the caller as an [`Error`].

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ClientBuilder, ClientConfig, JSON_CONTENT_TYPE, LineClient, RequestContext, USER_AGENT};
pub use error::{Error, ErrorDetail, Result};
pub use transport::Transport;
pub use types::*;

// Re-exported so callers can build contexts without naming tokio-util.
pub use tokio_util::sync::CancellationToken;
