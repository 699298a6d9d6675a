//! Narration webhook adapter.

use async_trait::async_trait;
use pathfinder_core::error::ProviderError;
use pathfinder_core::provider::{NarrationReply, NarrationRequest, NarrationService};
use tracing::debug;

use crate::client::{decode_json, transport};

/// The hosted narration workflow.
pub const DEFAULT_WEBHOOK_URL: &str = "https://workflowly.online/webhook/pathfinder-narration";

/// Posts narration requests to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookNarrationService {
    client: reqwest::Client,
    url: String,
}

impl WebhookNarrationService {
    /// Creates a service posting to `url`.
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl NarrationService for WebhookNarrationService {
    async fn narrate(&self, request: &NarrationRequest) -> Result<NarrationReply, ProviderError> {
        debug!(location_id = %request.location_id, path_id = %request.path_id, "posting narration request");
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport(&e))?;
        decode_json(response).await
    }
}
