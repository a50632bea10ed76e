//! Profile API.

use crate::client::{LineClient, RequestContext};
use crate::endpoint;
use crate::error::Result;
use crate::types::Profile;

/// Profile API client.
pub struct ProfilesApi {
    client: LineClient,
    ctx: Option<RequestContext>,
}

impl ProfilesApi {
    pub(crate) fn new(client: LineClient) -> Self {
        Self { client, ctx: None }
    }

    /// Bind every call made through this handle to a request context.
    pub fn with_context(mut self, ctx: RequestContext) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Get a user's profile.
    pub async fn get(&self, user_id: &str) -> Result<Profile> {
        self.client.get_json(self.ctx.as_ref(), &endpoint::profile(user_id)?).await
    }
}
