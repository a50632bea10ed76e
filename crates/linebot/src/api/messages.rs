//! Messages API.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use crate::client::{LineClient, RequestContext};
use crate::endpoint;
use crate::error::Result;
use crate::types::{MessageContent, MulticastRequest, PushMessageRequest, ReplyMessageRequest};

/// Messages API client.
pub struct MessagesApi {
    client: LineClient,
    ctx: Option<RequestContext>,
}

impl MessagesApi {
    pub(crate) fn new(client: LineClient) -> Self {
        Self { client, ctx: None }
    }

    /// Bind every call made through this handle to a request context.
    pub fn with_context(mut self, ctx: RequestContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Push messages to a user, group or room.
    pub async fn push(&self, request: &PushMessageRequest) -> Result<()> {
        self.client.post_json(self.ctx.as_ref(), endpoint::PUSH_MESSAGE, request).await
    }

    /// Reply to a webhook event.
    pub async fn reply(&self, request: &ReplyMessageRequest) -> Result<()> {
        self.client.post_json(self.ctx.as_ref(), endpoint::REPLY_MESSAGE, request).await
    }

    /// Send the same messages to several users.
    pub async fn multicast(&self, request: &MulticastRequest) -> Result<()> {
        self.client.post_json(self.ctx.as_ref(), endpoint::MULTICAST, request).await
    }

    /// Download the content of an image, video, audio or file message.
    pub async fn content(&self, message_id: &str) -> Result<MessageContent> {
        let endpoint = endpoint::message_content(message_id)?;
        let response = self
            .client
            .send(
                self.ctx.as_ref(),
                Method::GET,
                &endpoint,
                None,
            )
            .await?;
        let response = self.client.check(response).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(MessageContent { content_type, body })
    }
}
