//! Group and room API.

use reqwest::{Body, Method};

use crate::client::{LineClient, RequestContext};
use crate::endpoint;
use crate::error::Result;

/// Group and room API client.
pub struct ChatsApi {
    client: LineClient,
    ctx: Option<RequestContext>,
}

impl ChatsApi {
    pub(crate) fn new(client: LineClient) -> Self {
        Self { client, ctx: None }
    }

    /// Bind every call made through this handle to a request context.
    pub fn with_context(mut self, ctx: RequestContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Leave a group chat.
    pub async fn leave_group(&self, group_id: &str) -> Result<()> {
        self.leave(&endpoint::leave_group(group_id)?).await
    }

    /// Leave a multi-person chat room.
    pub async fn leave_room(&self, room_id: &str) -> Result<()> {
        self.leave(&endpoint::leave_room(room_id)?).await
    }

    async fn leave(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .send(self.ctx.as_ref(), Method::POST, path, Some(Body::from(Vec::new())))
            .await?;
        self.client.check(response).await?;
        Ok(())
    }
}
