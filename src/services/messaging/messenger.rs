use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{MessagingProvider, ProfileProvider};
use crate::models::OutboundMessage;

/// Graph API client for the Send API and user profile lookups.
pub struct MessengerClient {
    graph_api_url: String,
    page_access_token: String,
    client: reqwest::Client,
}

impl MessengerClient {
    pub fn new(graph_api_url: String, page_access_token: String) -> Self {
        Self {
            graph_api_url: graph_api_url.trim_end_matches('/').to_string(),
            page_access_token,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    recipient_id: Option<String>,
    message_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    first_name: Option<String>,
}

#[async_trait]
impl MessagingProvider for MessengerClient {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        let url = format!("{}/me/messages", self.graph_api_url);

        let resp = self
            .client
            .post(&url)
            .query(&[("access_token", self.page_access_token.as_str())])
            .json(message)
            .send()
            .await
            .context("failed to call Send API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Send API error ({status}): {body}");
        }

        let sent: SendResponse = resp
            .json()
            .await
            .context("failed to parse Send API response")?;

        match sent.message_id {
            Some(mid) => tracing::info!(
                recipient = sent.recipient_id.as_deref().unwrap_or(""),
                message_id = %mid,
                "sent message"
            ),
            None => tracing::info!(
                recipient = sent.recipient_id.as_deref().unwrap_or(""),
                "called Send API"
            ),
        }

        Ok(())
    }
}

#[async_trait]
impl ProfileProvider for MessengerClient {
    async fn first_name(&self, user_id: &str) -> anyhow::Result<String> {
        let url = format!("{}/{}", self.graph_api_url, user_id);

        let profile: ProfileResponse = self
            .client
            .get(&url)
            .query(&[
                ("fields", "first_name"),
                ("access_token", self.page_access_token.as_str()),
            ])
            .send()
            .await
            .context("failed to call user profile API")?
            .error_for_status()
            .context("user profile API returned error")?
            .json()
            .await
            .context("failed to parse user profile response")?;

        profile
            .first_name
            .ok_or_else(|| anyhow::anyhow!("missing first_name in profile for {user_id}"))
    }
}
